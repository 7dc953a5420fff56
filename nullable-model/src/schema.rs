use crate::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Declares a model's fields and which of them are nullable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Model (and table) name, e.g. "user_profiles".
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Fields whose empty values are stored as `null`.
    #[serde(default)]
    pub nullable: Vec<String>,
}

impl ModelSchema {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            nullable: Vec::new(),
        }
    }

    /// Adds a field declaration.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Replaces the nullable declaration.
    pub fn with_nullable<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nullable = names.into_iter().map(Into::into).collect();
        self
    }

    /// Looks up a field declaration by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Declared kind of a field, if the field exists.
    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.field(name).map(|f| f.kind)
    }

    /// Names of all date/time fields, in declaration order.
    pub fn date_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.kind == FieldKind::DateTime)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Checks that field names are unique and non-empty.
    ///
    /// Nullable names without a matching field are allowed (they never
    /// select anything) but are logged, since they are usually typos.
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.is_empty() {
            return Err(ModelError::Config("model name cannot be empty".into()));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(ModelError::Config(format!(
                    "model `{}` declares a field with an empty name",
                    self.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ModelError::Config(format!(
                    "model `{}` declares field `{}` twice",
                    self.name, field.name
                )));
            }
        }

        for name in &self.nullable {
            if !seen.contains(name.as_str()) {
                warn!(
                    "Model {} declares nullable field {} which is not a field",
                    self.name, name
                );
            }
        }

        Ok(())
    }
}

/// A single field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Shorthand for a plain text field.
    pub fn text(name: &str) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Shorthand for a numeric field.
    pub fn number(name: &str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    /// Shorthand for a boolean-cast field.
    pub fn bool(name: &str) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    /// Shorthand for a date/time field.
    pub fn datetime(name: &str) -> Self {
        Self::new(name, FieldKind::DateTime)
    }

    /// Shorthand for a field persisted as encoded JSON.
    pub fn json(name: &str) -> Self {
        Self::new(name, FieldKind::Json)
    }
}

/// How a field is cast between its raw and accessed forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Bool,
    #[serde(alias = "datetime")]
    DateTime,
    /// Persisted as an encoded JSON object or array.
    Json,
}
