//! In-memory record used to drive the hook without a host framework.

#![allow(dead_code)]

use nullable_fields::{Attributes, Nullable, NullableResult, codec, is_blank};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct FakeRecord {
    pub attributes: Attributes,
    pub nullable: Vec<String>,
    pub json: Vec<String>,
    pub dates: Vec<String>,
    pub mutated: Vec<String>,
    pub accessors: HashMap<String, Value>,
}

impl FakeRecord {
    /// Builds a record from a JSON object of raw attributes.
    pub fn new(attributes: Value, nullable: &[&str]) -> Self {
        let attributes = match attributes {
            Value::Object(map) => map,
            other => panic!("attributes must be an object, got {other}"),
        };
        Self {
            attributes,
            nullable: nullable.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn json(mut self, key: &str) -> Self {
        self.json.push(key.to_string());
        self
    }

    pub fn date(mut self, key: &str) -> Self {
        self.dates.push(key.to_string());
        self
    }

    pub fn mutated(mut self, key: &str) -> Self {
        self.mutated.push(key.to_string());
        self
    }

    /// Makes the accessor for `key` return `value` regardless of the raw attribute.
    pub fn accessor(mut self, key: &str, value: Value) -> Self {
        self.accessors.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> &Value {
        self.attributes.get(key).unwrap_or(&Value::Null)
    }
}

impl Nullable for FakeRecord {
    fn nullable_fields(&self) -> &[String] {
        &self.nullable
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attribute(&self, key: &str) -> NullableResult<Value> {
        if let Some(value) = self.accessors.get(key) {
            return Ok(value.clone());
        }
        let raw = self.get(key).clone();
        match raw {
            Value::String(ref encoded) if self.is_json_castable(key) => {
                if is_blank(encoded) {
                    Ok(Value::Null)
                } else {
                    codec::decode(key, encoded)
                }
            }
            other => Ok(other),
        }
    }

    fn is_json_castable(&self, key: &str) -> bool {
        self.json.iter().any(|k| k == key)
    }

    fn has_set_mutator(&self, key: &str) -> bool {
        self.mutated.iter().any(|k| k == key)
    }

    fn date_fields(&self) -> Vec<&str> {
        self.dates.iter().map(String::as_str).collect()
    }

    fn set_raw_attribute(&mut self, key: &str, value: Value) {
        self.attributes.insert(key.to_string(), value);
    }
}
