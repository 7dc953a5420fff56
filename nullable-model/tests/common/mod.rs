//! Fixture models shared by the model tests.

#![allow(dead_code)]

use nullable_model::{FieldDescriptor, Model, ModelError, ModelSchema};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub const PROFILE_FIELDS: [&str; 7] = [
    "facebook_profile",
    "twitter_profile",
    "linkedin_profile",
    "array_casted",
    "array_not_casted",
    "twitter_profile_mutated",
    "boolean",
];

fn profile_schema(name: &str) -> ModelSchema {
    ModelSchema::new(name)
        .with_field(FieldDescriptor::text("facebook_profile"))
        .with_field(FieldDescriptor::text("twitter_profile"))
        .with_field(FieldDescriptor::text("linkedin_profile"))
        .with_field(FieldDescriptor::json("array_casted"))
        .with_field(FieldDescriptor::text("array_not_casted"))
        .with_field(FieldDescriptor::text("twitter_profile_mutated"))
        .with_field(FieldDescriptor::bool("boolean"))
        .with_nullable(PROFILE_FIELDS)
}

/// Social profile with a prefixing mutator on `twitter_profile_mutated`.
pub fn user_profile() -> Arc<Model> {
    Model::builder(profile_schema("user_profiles"))
        .mutator("twitter_profile_mutated", |value| match value {
            Value::String(handle) => Ok(json!(format!("@{handle}"))),
            other => Err(ModelError::mutator(
                "twitter_profile_mutated",
                format!("expected a handle, got {other}"),
            )),
        })
        .with_nullable_fields()
        .build()
        .unwrap()
}

/// Same fields, but the nullable hook is called from the model's own saving hook.
pub fn user_profile_saving(ran: Arc<AtomicBool>) -> Arc<Model> {
    Model::builder(profile_schema("user_profiles"))
        .on_saving(move |record| {
            ran.store(true, Ordering::SeqCst);
            record.set_nullable_fields()
        })
        .build()
        .unwrap()
}

/// Product whose `amount` mutator stores an encoded money structure, or an
/// empty structure while `empty_amount` is set.
pub fn product(empty_amount: Arc<AtomicBool>) -> Arc<Model> {
    let schema = ModelSchema::new("products")
        .with_field(FieldDescriptor::text("name"))
        .with_field(FieldDescriptor::json("amount"))
        .with_nullable(["amount"]);

    Model::builder(schema)
        .mutator("amount", move |value| {
            if empty_amount.load(Ordering::SeqCst) {
                return Ok(json!([]));
            }
            let amount = match &value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.parse::<f64>().ok(),
                _ => None,
            }
            .ok_or_else(|| ModelError::mutator("amount", format!("not a number: {value}")))?;
            let cents = (amount * 100.0).round() as i64;
            Ok(json!(serde_json::to_string(&json!({"amount": cents, "currency": "USD"})).unwrap()))
        })
        .with_nullable_fields()
        .build()
        .unwrap()
}

/// Model with a single nullable date field.
pub fn date_test() -> Arc<Model> {
    let schema = ModelSchema::new("dates")
        .with_field(FieldDescriptor::datetime("last_tested_at"))
        .with_nullable(["last_tested_at"]);

    Model::builder(schema).with_nullable_fields().build().unwrap()
}
