//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid fingerprint: {0}")]
    InvalidFingerprint(String),

    #[error("invalid file name: {0}")]
    InvalidFileName(String),

    #[error("invalid backend: {0}")]
    InvalidBackend(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
