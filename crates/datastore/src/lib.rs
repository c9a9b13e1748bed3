//! Disk-backed persistence for per-document state and attachment files.
//!
//! This crate provides:
//! - Per-document JSON state keyed by fingerprint
//! - Attachment storage with JSON metadata sidecars, one area per backend
//! - A stash of original (as-imported) document files
//! - Directory resolution for the datastore roots
//!
//! Every operation goes straight to disk; there is no in-memory cache and
//! no cross-operation locking. Callers serialize writes to the same
//! fingerprint at a higher layer.

pub mod dirs;
pub mod disk;
pub mod error;
pub mod traits;

pub use dirs::DataDirs;
pub use disk::DiskDatastore;
pub use error::{DatastoreError, DatastoreResult};
pub use traits::{
    Datastore, DatastoreFile, DeleteOutcome, DeleteRef, DeleteResult, DocMetaLookup, DocMetaRef,
    FileMeta,
};

use margin_core::DatastoreConfig;
use std::sync::Arc;

/// Create a disk datastore from configuration.
///
/// Resolves the root directories, creates any that are missing, and
/// returns the store behind the [`Datastore`] seam. The returned handle is
/// the single owned dependency callers thread through their components;
/// there is no process-global store.
pub async fn from_config(config: &DatastoreConfig) -> DatastoreResult<Arc<dyn Datastore>> {
    let dirs = DataDirs::resolve(config)?;
    let store = DiskDatastore::new(dirs);
    store.init().await?;
    Ok(Arc::new(store))
}
