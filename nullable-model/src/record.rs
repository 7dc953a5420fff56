use crate::cast;
use crate::{FieldKind, Model, ModelError, ModelResult};
use chrono::NaiveDateTime;
use nullable_fields::{Attributes, Nullable, NullableResult};
use serde_json::Value;
use std::sync::Arc;

/// A single record of a [`Model`].
///
/// Owns its raw attributes in assignment order. Assignments go through the
/// model's mutators and casts; reads through [`Record::get`] apply the
/// accessor casts. Raw storage is only written directly by saving hooks.
#[derive(Debug, Clone)]
pub struct Record {
    model: Arc<Model>,
    id: Option<i64>,
    attributes: Attributes,
}

impl Record {
    /// Creates an empty, not yet persisted record.
    pub fn new(model: Arc<Model>) -> Self {
        Self {
            model,
            id: None,
            attributes: Attributes::new(),
        }
    }

    /// Rebuilds a persisted record from raw stored values. Mutators do not run.
    pub fn hydrate(model: Arc<Model>, id: i64, attributes: Attributes) -> Self {
        Self {
            model,
            id: Some(id),
            attributes,
        }
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Whether the record has been written to a store.
    pub fn exists(&self) -> bool {
        self.id.is_some()
    }

    /// Records the id a store assigned on first insert.
    pub fn mark_persisted(&mut self, id: i64) {
        self.id = Some(id);
    }

    /// Raw attributes, exactly as they will be persisted.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Raw stored value of one attribute.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Assigns an attribute through its mutator, or through the cast of its kind.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> ModelResult<()> {
        let kind = self.declared_kind(key)?;
        let value = value.into();

        let raw = match self.model.mutator(key) {
            Some(mutate) => mutate(value)?,
            None => match kind {
                FieldKind::DateTime => cast::date_for_storage(key, value)?,
                FieldKind::Json => cast::json_for_storage(key, value)?,
                FieldKind::Text | FieldKind::Number | FieldKind::Bool => value,
            },
        };

        self.attributes.insert(key.to_string(), raw);
        Ok(())
    }

    /// Assigns a date field from a parsed date/time.
    pub fn set_datetime(&mut self, key: &str, value: NaiveDateTime) -> ModelResult<()> {
        self.set(key, cast::format_datetime(value))
    }

    /// Mass-assigns attributes in order. Stops at the first failing assignment.
    pub fn fill<I, K, V>(&mut self, pairs: I) -> ModelResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (key, value) in pairs {
            self.set(key.as_ref(), value)?;
        }
        Ok(())
    }

    /// Reads an attribute with its cast applied. Unset fields read as `null`.
    pub fn get(&self, key: &str) -> ModelResult<Value> {
        let kind = self.declared_kind(key)?;
        let raw = self.raw(key).unwrap_or(&Value::Null);
        Ok(cast::read_attribute(Some(kind), key, raw)?)
    }

    /// Reads a date field as a date/time; `None` when unset or null.
    pub fn get_datetime(&self, key: &str) -> ModelResult<Option<NaiveDateTime>> {
        self.declared_kind(key)?;
        match self.raw(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => cast::parse_datetime(key, value).map(Some),
        }
    }

    /// Runs the model's saving hooks in registration order.
    pub fn fire_saving(&mut self) -> ModelResult<()> {
        let model = Arc::clone(&self.model);
        for hook in model.saving_hooks() {
            hook(&mut *self)?;
        }
        Ok(())
    }

    /// Stores every empty nullable field as `null`.
    ///
    /// Registered by [`crate::ModelBuilder::with_nullable_fields`]; models with
    /// their own saving hook call it from there instead.
    pub fn set_nullable_fields(&mut self) -> ModelResult<()> {
        nullable_fields::set_nullable_fields(self)?;
        Ok(())
    }

    fn declared_kind(&self, key: &str) -> ModelResult<FieldKind> {
        self.model
            .schema()
            .kind_of(key)
            .ok_or_else(|| ModelError::UnknownField {
                model: self.model.name().to_string(),
                field: key.to_string(),
            })
    }
}

impl Nullable for Record {
    fn nullable_fields(&self) -> &[String] {
        &self.model.schema().nullable
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attribute(&self, key: &str) -> NullableResult<Value> {
        let raw = self.raw(key).unwrap_or(&Value::Null);
        cast::read_attribute(self.model.schema().kind_of(key), key, raw)
    }

    fn is_json_castable(&self, key: &str) -> bool {
        self.model.schema().kind_of(key) == Some(FieldKind::Json)
    }

    fn has_set_mutator(&self, key: &str) -> bool {
        self.model.has_set_mutator(key)
    }

    fn date_fields(&self) -> Vec<&str> {
        self.model.schema().date_fields()
    }

    fn set_raw_attribute(&mut self, key: &str, value: Value) {
        self.attributes.insert(key.to_string(), value);
    }
}
