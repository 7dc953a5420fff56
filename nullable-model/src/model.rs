use crate::{ModelResult, ModelSchema, Record};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Custom setter: receives the assigned value and returns the raw value to store.
pub type Mutator = Arc<dyn Fn(Value) -> ModelResult<Value> + Send + Sync>;

/// Callback run against a record right before it is persisted.
pub type SavingHook = Arc<dyn Fn(&mut Record) -> ModelResult<()> + Send + Sync>;

/// A model type: its schema, mutators and saving hooks.
///
/// Immutable once built and shared by every record of the type.
pub struct Model {
    schema: ModelSchema,
    mutators: HashMap<String, Mutator>,
    saving: Vec<SavingHook>,
}

impl Model {
    pub fn builder(schema: ModelSchema) -> ModelBuilder {
        ModelBuilder {
            schema,
            mutators: HashMap::new(),
            saving: Vec::new(),
        }
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    /// The custom setter registered for `field`, if any.
    pub fn mutator(&self, field: &str) -> Option<&Mutator> {
        self.mutators.get(field)
    }

    pub fn has_set_mutator(&self, field: &str) -> bool {
        self.mutators.contains_key(field)
    }

    /// Saving hooks in registration order.
    pub fn saving_hooks(&self) -> &[SavingHook] {
        &self.saving
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut mutated: Vec<&str> = self.mutators.keys().map(String::as_str).collect();
        mutated.sort_unstable();
        f.debug_struct("Model")
            .field("schema", &self.schema)
            .field("mutators", &mutated)
            .field("saving_hooks", &self.saving.len())
            .finish()
    }
}

/// Builder for [`Model`]; hooks and mutators are registered here and nowhere else.
pub struct ModelBuilder {
    schema: ModelSchema,
    mutators: HashMap<String, Mutator>,
    saving: Vec<SavingHook>,
}

impl ModelBuilder {
    /// Registers a custom setter for `field`.
    pub fn mutator<F>(mut self, field: &str, mutator: F) -> Self
    where
        F: Fn(Value) -> ModelResult<Value> + Send + Sync + 'static,
    {
        self.mutators.insert(field.to_string(), Arc::new(mutator));
        self
    }

    /// Registers a hook run before every save, after the ones already registered.
    pub fn on_saving<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Record) -> ModelResult<()> + Send + Sync + 'static,
    {
        self.saving.push(Arc::new(hook));
        self
    }

    /// Stores empty nullable fields as `null` on every save.
    pub fn with_nullable_fields(self) -> Self {
        self.on_saving(|record| record.set_nullable_fields())
    }

    pub fn build(self) -> ModelResult<Arc<Model>> {
        self.schema.validate()?;

        for field in self.mutators.keys() {
            if self.schema.field(field).is_none() {
                warn!(
                    "Model {} registers a mutator for undeclared field {}",
                    self.schema.name, field
                );
            }
        }

        Ok(Arc::new(Model {
            schema: self.schema,
            mutators: self.mutators,
            saving: self.saving,
        }))
    }
}
