//! Fixture models and store setup for the store tests.

#![allow(dead_code)]

use nullable_model::{FieldDescriptor, Model, ModelError, ModelSchema};
use nullable_store::RecordStore;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::EnvFilter;

/// Routes store logs to the test output when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory store with tables for every given model.
pub fn store_with(models: &[&Arc<Model>]) -> RecordStore {
    init_tracing();
    let store = RecordStore::open_in_memory().unwrap();
    for model in models {
        store.create_table(model).unwrap();
    }
    store
}

fn profile_schema() -> ModelSchema {
    ModelSchema::new("user_profiles")
        .with_field(FieldDescriptor::text("facebook_profile"))
        .with_field(FieldDescriptor::text("twitter_profile"))
        .with_field(FieldDescriptor::text("linkedin_profile"))
        .with_field(FieldDescriptor::json("array_casted"))
        .with_field(FieldDescriptor::text("array_not_casted"))
        .with_field(FieldDescriptor::text("twitter_profile_mutated"))
        .with_field(FieldDescriptor::bool("boolean"))
        .with_nullable([
            "facebook_profile",
            "twitter_profile",
            "linkedin_profile",
            "array_casted",
            "array_not_casted",
            "twitter_profile_mutated",
            "boolean",
        ])
}

fn prefix_handle(value: Value) -> Result<Value, ModelError> {
    match value {
        Value::String(handle) => Ok(json!(format!("@{handle}"))),
        other => Err(ModelError::mutator(
            "twitter_profile_mutated",
            format!("expected a handle, got {other}"),
        )),
    }
}

pub fn user_profile() -> Arc<Model> {
    Model::builder(profile_schema())
        .mutator("twitter_profile_mutated", prefix_handle)
        .with_nullable_fields()
        .build()
        .unwrap()
}

/// Profile model whose own saving hook calls the nullable normalization.
pub fn user_profile_saving(ran: Arc<AtomicBool>) -> Arc<Model> {
    Model::builder(profile_schema())
        .mutator("twitter_profile_mutated", prefix_handle)
        .on_saving(move |record| {
            ran.store(true, Ordering::SeqCst);
            record.set_nullable_fields()
        })
        .build()
        .unwrap()
}

/// Product whose `amount` mutator stores encoded money, or an empty
/// structure while `empty_amount` is set.
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

pub fn date_test() -> Arc<Model> {
    let schema = ModelSchema::new("dates")
        .with_field(FieldDescriptor::datetime("last_tested_at"))
        .with_nullable(["last_tested_at"]);

    Model::builder(schema).with_nullable_fields().build().unwrap()
}
