//! Conversions between assigned, raw and accessed attribute values.

use crate::{FieldKind, ModelError, ModelResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use nullable_fields::{NullableError, NullableResult, codec, is_blank};
use serde_json::Value;

/// Storage format of date/time attributes.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATE_INPUT_FORMATS: [&str; 2] = [DATE_FORMAT, "%Y-%m-%dT%H:%M:%S"];

pub(crate) fn format_datetime(value: NaiveDateTime) -> Value {
    Value::String(value.format(DATE_FORMAT).to_string())
}

/// Normalizes a value assigned to a date field.
///
/// Blank strings and `null` are stored untouched so normalization can null
/// them; anything else must read as a date.
pub(crate) fn date_for_storage(field: &str, value: Value) -> ModelResult<Value> {
    let keep_raw = match &value {
        Value::Null => true,
        Value::String(text) => is_blank(text),
        _ => false,
    };

    if keep_raw {
        return Ok(value);
    }
    parse_datetime(field, &value).map(format_datetime)
}

/// Reads a date from a string in any accepted format, or from a unix
/// timestamp in seconds.
pub(crate) fn parse_datetime(field: &str, value: &Value) -> ModelResult<NaiveDateTime> {
    let invalid = || ModelError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    };

    match value {
        Value::String(text) => {
            let text = text.trim();
            DATE_INPUT_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.naive_utc()))
                .or_else(|| {
                    NaiveDate::parse_from_str(text, "%Y-%m-%d")
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                })
                .ok_or_else(invalid)
        }
        Value::Number(number) => number
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.naive_utc())
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Encodes structures assigned to a JSON field.
///
/// Strings are taken as already encoded. Booleans and `null` are kept so
/// normalization sees them as they were assigned.
pub(crate) fn json_for_storage(field: &str, value: Value) -> ModelResult<Value> {
    match value {
        Value::Array(_) | Value::Object(_) => Ok(Value::String(codec::encode(field, &value)?)),
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(value),
        Value::Number(_) => {
            Err(NullableError::type_mismatch(field, "an object or array", &value).into())
        }
    }
}

/// Applies the accessor cast of `kind` to a raw attribute. A blank JSON
/// field reads as `null`.
pub(crate) fn read_attribute(
    kind: Option<FieldKind>,
    field: &str,
    raw: &Value,
) -> NullableResult<Value> {
    match (kind, raw) {
        (Some(FieldKind::Json), Value::String(encoded)) if is_blank(encoded) => Ok(Value::Null),
        (Some(FieldKind::Json), Value::String(encoded)) => codec::decode(field, encoded),
        (Some(FieldKind::Bool), _) => read_bool(field, raw),
        _ => Ok(raw.clone()),
    }
}

fn read_bool(field: &str, raw: &Value) -> NullableResult<Value> {
    let flag = match raw {
        Value::Null => return Ok(Value::Null),
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_f64() {
            Some(n) if n == 0.0 => Some(false),
            Some(n) if n == 1.0 => Some(true),
            _ => None,
        },
        Value::String(text) => match text.as_str() {
            "" | "0" => Some(false),
            "1" => Some(true),
            _ => None,
        },
        Value::Array(_) | Value::Object(_) => None,
    };

    flag.map(Value::Bool)
        .ok_or_else(|| NullableError::type_mismatch(field, "a boolean, 0 or 1", raw))
}
