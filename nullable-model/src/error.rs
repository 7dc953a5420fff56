//! Error types for the record model.

use nullable_fields::NullableError;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while building models or assigning attributes.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Attribute is not declared on the model.
    #[error("unknown field `{field}` on model `{model}`")]
    UnknownField { model: String, field: String },

    /// Value assigned to a date field could not be read as a date.
    #[error("invalid date for field `{field}`: {value}")]
    InvalidDate { field: String, value: String },

    /// A mutator rejected its input.
    #[error("mutator for field `{field}` failed: {message}")]
    Mutator { field: String, message: String },

    /// Nullable-field normalization or a cast failed.
    #[error(transparent)]
    Nullable(#[from] NullableError),

    /// Schema declarations are inconsistent.
    #[error("invalid schema: {0}")]
    Config(String),

    /// Schema file is not valid TOML.
    #[error("schema parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModelError {
    /// Shorthand for a mutator failure.
    pub fn mutator(field: &str, message: impl Into<String>) -> Self {
        Self::Mutator {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
