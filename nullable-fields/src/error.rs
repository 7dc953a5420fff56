//! Error types for nullable-field normalization.

use thiserror::Error;

/// Result type for normalization operations.
pub type NullableResult<T> = Result<T, NullableError>;

/// Errors raised while classifying a nullable attribute.
///
/// Any of these aborts the save: a value is never guessed to be empty or
/// non-empty when it cannot be read.
#[derive(Debug, Error)]
pub enum NullableError {
    /// A JSON-cast attribute holds a string that is not valid JSON.
    #[error("malformed JSON in field `{field}`: {source}")]
    MalformedJson {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// A structure could not be encoded back into its persisted form.
    #[error("failed to encode field `{field}`: {source}")]
    Encode {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// The value's shape contradicts the field's declared type.
    #[error("type mismatch in field `{field}`: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl NullableError {
    /// Builds a [`NullableError::TypeMismatch`] naming the kind of `value`.
    pub fn type_mismatch(
        field: &str,
        expected: &'static str,
        value: &serde_json::Value,
    ) -> Self {
        Self::TypeMismatch {
            field: field.to_string(),
            expected,
            found: kind_name(value),
        }
    }
}

/// Human-readable name of a value's JSON kind, used in error messages.
pub(crate) fn kind_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
