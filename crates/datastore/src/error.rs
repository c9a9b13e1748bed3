//! Datastore error types.

use thiserror::Error;

/// Datastore operation errors.
#[derive(Debug, Error)]
pub enum DatastoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] margin_core::Error),

    #[error("invalid doc meta: {0}")]
    InvalidDocMeta(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("metadata serialization error: {0}")]
    Meta(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for datastore operations.
pub type DatastoreResult<T> = std::result::Result<T, DatastoreError>;
