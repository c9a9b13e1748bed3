//! Core domain types and shared logic for the margin datastore.
//!
//! This crate defines the canonical data model used by the persistence
//! layer and its callers:
//! - Document fingerprints
//! - Validated attachment file names
//! - Logical attachment backends
//! - Datastore configuration

pub mod backend;
pub mod config;
pub mod error;
pub mod filename;
pub mod fingerprint;

pub use backend::Backend;
pub use config::DatastoreConfig;
pub use error::{Error, Result};
pub use filename::FileName;
pub use fingerprint::Fingerprint;

/// Name of the per-document state file.
pub const DOC_META_FILE: &str = "state.json";

/// Suffix appended to an attachment payload name for its metadata sidecar.
pub const META_SUFFIX: &str = ".meta";
