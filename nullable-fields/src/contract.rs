use crate::{NullableResult, codec};
use serde_json::Value;

/// Ordered attribute mapping of a record (field name → raw value).
pub type Attributes = serde_json::Map<String, Value>;

/// Capabilities a record type provides so its nullable fields can be
/// normalized before it is persisted.
///
/// The record stays the owner of its attributes, casts and mutators; this
/// trait only exposes what the classifier needs to read them and the single
/// write the hook performs.
pub trait Nullable {
    /// Field names this record type opted into empty-to-null normalization.
    fn nullable_fields(&self) -> &[String];

    /// The raw attribute mapping, as it will be persisted.
    fn attributes(&self) -> &Attributes;

    /// Reads one attribute through the record's accessor, with its cast applied.
    fn attribute(&self, key: &str) -> NullableResult<Value>;

    /// Whether `key` is persisted as an encoded JSON structure.
    fn is_json_castable(&self, key: &str) -> bool;

    /// Whether a custom setter transforms `key` on assignment.
    fn has_set_mutator(&self, key: &str) -> bool;

    /// Fields declared as date/time values.
    fn date_fields(&self) -> Vec<&str>;

    /// Encodes a structure into the persisted form of a JSON-cast field.
    fn as_json(&self, key: &str, value: &Value) -> NullableResult<String> {
        codec::encode(key, value)
    }

    /// Decodes the persisted form of a JSON-cast field.
    fn from_json(&self, key: &str, encoded: &str) -> NullableResult<Value> {
        codec::decode(key, encoded)
    }

    /// Overwrites one raw attribute, bypassing mutators and casts.
    fn set_raw_attribute(&mut self, key: &str, value: Value);
}
