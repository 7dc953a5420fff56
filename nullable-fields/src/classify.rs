//! Emptiness classification of a single attribute.

use crate::{Nullable, NullableError, NullableResult};
use serde_json::Value;

/// Characters stripped from both ends of a scalar before the blank check.
const TRIMMED: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];

const EXPECTED_DATE: &str = "a date string or timestamp";
const EXPECTED_STRUCTURE: &str = "an encoded object or array";

/// Returns the value to store for nullable attribute `key`: `null` if the
/// attribute is empty, otherwise the value in its persisted form.
///
/// Resolution order matters and is fixed:
///
/// 1. Date fields are judged on `value` as-is: a blank string becomes `null`,
///    anything else is kept.
/// 2. Without a mutator, the attribute is re-read through the record's
///    accessor so casts are applied; with one, `value` already is the
///    mutator's output and is used directly.
/// 3. JSON-cast fields holding an encoded string are decoded before judging.
///    A blank string is not decoded; it is empty like any other blank value.
/// 4. Booleans are kept, empty structures and blank strings become `null`.
///    Non-empty structures on JSON-cast fields are re-encoded.
pub fn null_if_empty<M>(model: &M, key: &str, value: Value) -> NullableResult<Value>
where
    M: Nullable + ?Sized,
{
    if model.date_fields().contains(&key) {
        return null_if_blank_date(key, value);
    }

    let value = if model.has_set_mutator(key) {
        value
    } else {
        model.attribute(key)?
    };

    if !model.is_json_castable(key) {
        return Ok(null_if_blank(value));
    }

    let value = match value {
        Value::String(ref encoded) if is_blank(encoded) => Value::Null,
        Value::String(encoded) => model.from_json(key, &encoded)?,
        other => other,
    };

    match value {
        Value::Null | Value::Bool(_) => Ok(value),
        Value::Array(ref items) if items.is_empty() => Ok(Value::Null),
        Value::Object(ref fields) if fields.is_empty() => Ok(Value::Null),
        Value::String(ref text) if is_blank(text) => Ok(Value::Null),
        Value::Array(_) | Value::Object(_) => Ok(Value::String(model.as_json(key, &value)?)),
        Value::Number(_) | Value::String(_) => Err(NullableError::type_mismatch(
            key,
            EXPECTED_STRUCTURE,
            &value,
        )),
    }
}

/// Classifies a detached value with no field context: booleans and numbers
/// are kept, empty structures and blank strings become `null`.
///
/// Non-blank strings are returned untrimmed.
pub fn null_if_blank(value: Value) -> Value {
    match value {
        Value::Array(ref items) if items.is_empty() => Value::Null,
        Value::Object(ref fields) if fields.is_empty() => Value::Null,
        Value::String(ref text) if is_blank(text) => Value::Null,
        other => other,
    }
}

fn null_if_blank_date(key: &str, value: Value) -> NullableResult<Value> {
    match value {
        Value::String(ref text) if is_blank(text) => Ok(Value::Null),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(value),
        Value::Array(_) | Value::Object(_) => {
            Err(NullableError::type_mismatch(key, EXPECTED_DATE, &value))
        }
    }
}

/// Whether `text` holds nothing but padding (space, `\t`, `\n`, `\r`, `\0`,
/// vertical tab).
pub fn is_blank(text: &str) -> bool {
    text.chars().all(|c| TRIMMED.contains(&c))
}
