//! JSON codec for the persisted form of structure-cast fields.

use crate::{NullableError, NullableResult};
use serde_json::Value;

/// Encodes `value` into its compact persisted form.
pub fn encode(field: &str, value: &Value) -> NullableResult<String> {
    serde_json::to_string(value).map_err(|source| NullableError::Encode {
        field: field.to_string(),
        source,
    })
}

/// Decodes a persisted JSON string back into a structure.
pub fn decode(field: &str, encoded: &str) -> NullableResult<Value> {
    serde_json::from_str(encoded).map_err(|source| NullableError::MalformedJson {
        field: field.to_string(),
        source,
    })
}
