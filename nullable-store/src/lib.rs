//! SQLite record store for nullable-aware models.
//!
//! Persists [`nullable_model::Record`]s one table per model. Every save fires
//! the model's saving hooks first, so normalization (such as storing empty
//! nullable fields as `null`) is applied before any SQL runs, and a failing
//! hook aborts the write.
//!
//! # Layout
//!
//! - One table per model, named after the model
//! - An `id INTEGER PRIMARY KEY AUTOINCREMENT` column plus one nullable
//!   column per declared field
//! - Booleans are stored as integers, JSON fields as encoded text, dates as
//!   `YYYY-MM-DD HH:MM:SS` text

mod error;
mod record_store;
mod sql;

pub use error::{StorageError, StorageResult};
pub use record_store::RecordStore;
