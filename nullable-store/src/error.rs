//! Error types for the record store.

use nullable_model::ModelError;
use thiserror::Error;

/// Result type for store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A saving hook, mutator or cast failed; nothing was written.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Table or column name is not a plain identifier.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Invalid data.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Record not found.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Connection mutex was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}
