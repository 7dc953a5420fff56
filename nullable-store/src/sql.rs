//! Conversions between record attributes and SQLite values.

use crate::{StorageError, StorageResult};
use nullable_model::FieldKind;
use rusqlite::types::Value as SqlValue;
use serde_json::{Number, Value};

/// Column type of each field kind.
pub(crate) fn column_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text | FieldKind::DateTime | FieldKind::Json => "TEXT",
        FieldKind::Number => "REAL",
        FieldKind::Bool => "INTEGER",
    }
}

/// Quotes a table or column name after checking it is a plain identifier.
pub(crate) fn quote_identifier(name: &str) -> StorageResult<String> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid {
        return Err(StorageError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("\"{name}\""))
}

/// Converts a raw attribute into the value bound for its column.
pub(crate) fn to_sql(field: &str, kind: FieldKind, value: &Value) -> StorageResult<SqlValue> {
    let bound = match value {
        Value::Null => SqlValue::Null,
        Value::Bool(flag) => SqlValue::Integer(i64::from(*flag)),
        Value::Number(number) => match number.as_i64() {
            Some(int) => SqlValue::Integer(int),
            None => SqlValue::Real(number.as_f64().ok_or_else(|| {
                StorageError::InvalidData(format!(
                    "field `{field}` holds an unrepresentable number"
                ))
            })?),
        },
        Value::String(text) => SqlValue::Text(text.clone()),
        Value::Array(_) | Value::Object(_) if kind == FieldKind::Json => {
            SqlValue::Text(serde_json::to_string(value)?)
        }
        Value::Array(_) | Value::Object(_) => {
            return Err(StorageError::InvalidData(format!(
                "field `{field}` holds a structure but is not JSON-cast"
            )));
        }
    };
    Ok(bound)
}

/// Converts a stored column value back into a raw attribute.
pub(crate) fn from_sql(field: &str, kind: FieldKind, value: SqlValue) -> StorageResult<Value> {
    let raw = match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(int) => Value::from(int),
        SqlValue::Real(real) if kind == FieldKind::Number && is_integral(real) => {
            Value::from(real as i64)
        }
        SqlValue::Real(real) => Number::from_f64(real).map(Value::Number).ok_or_else(|| {
            StorageError::InvalidData(format!("field `{field}` holds a non-finite number"))
        })?,
        SqlValue::Text(text) => Value::String(text),
        SqlValue::Blob(_) => {
            return Err(StorageError::InvalidData(format!(
                "field `{field}` holds a blob"
            )));
        }
    };
    Ok(raw)
}

fn is_integral(real: f64) -> bool {
    real.fract() == 0.0 && real >= i64::MIN as f64 && real <= i64::MAX as f64
}
