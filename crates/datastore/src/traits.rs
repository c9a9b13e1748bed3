//! Datastore trait definition and the result types it produces.

use crate::error::DatastoreResult;
use async_trait::async_trait;
use bytes::Bytes;
use margin_core::{Backend, FileName, Fingerprint};
use serde_json::Value;
use std::path::PathBuf;
use url::Url;

/// Metadata attached to a stored file: an arbitrary JSON object.
pub type FileMeta = serde_json::Map<String, Value>;

/// Descriptor for a stored attachment file.
#[derive(Clone, Debug, PartialEq)]
pub struct DatastoreFile {
    /// The logical attachment name.
    pub name: FileName,
    /// `file://` URL of the payload on disk.
    pub url: Url,
    /// Parsed sidecar metadata.
    pub meta: FileMeta,
}

/// Listing entry for a known document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocMetaRef {
    /// Fingerprint of the document.
    pub fingerprint: Fingerprint,
}

/// The pair of artifacts removed by [`Datastore::delete`].
#[derive(Clone, Debug)]
pub struct DeleteRef {
    /// Document whose state file is removed.
    pub fingerprint: Fingerprint,
    /// Stash file removed alongside the document state.
    pub filename: FileName,
}

/// Outcome of one removal attempt within a [`DeleteResult`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The target existed and was removed.
    Removed,
    /// The target did not exist.
    NotFound,
    /// The removal failed.
    Failed(String),
}

impl DeleteOutcome {
    /// Whether the target was found and removed.
    pub fn removed(&self) -> bool {
        matches!(self, Self::Removed)
    }
}

/// Independent outcomes of a document deletion.
///
/// Deleting one target does not block attempting the other, so a caller
/// can distinguish "state gone, stash file was already missing" from a
/// full success.
#[derive(Clone, Debug)]
pub struct DeleteResult {
    /// Outcome for the document's state file.
    pub doc_meta_file: DeleteOutcome,
    /// Outcome for the stash file.
    pub data_file: DeleteOutcome,
}

/// Result of a document state lookup.
///
/// Absence is an ordinary state for a filesystem-backed store, so lookups
/// distinguish "not found" from "exists but inaccessible" instead of
/// collapsing both into one nullable value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocMetaLookup {
    /// The raw JSON text of the document state.
    Found(String),
    /// No document state exists for the fingerprint.
    NotFound,
    /// The state file exists but is not readable and writable.
    AccessDenied,
}

impl DocMetaLookup {
    /// Collapse to the nullable view: the state text when found.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Found(text) => Some(text),
            Self::NotFound | Self::AccessDenied => None,
        }
    }
}

/// Disk-backed persistence for per-document state and attachment files.
#[async_trait]
pub trait Datastore: Send + Sync + 'static {
    /// Ensure the root directories exist. Must complete before any other
    /// operation; ordering is a caller contract, not enforced internally.
    async fn init(&self) -> DatastoreResult<()>;

    /// Whether a directory named after the fingerprint exists under the
    /// data root and contains a state file.
    async fn contains(&self, fingerprint: &Fingerprint) -> DatastoreResult<bool>;

    /// Read the raw JSON text of a document's state file.
    async fn get_doc_meta(&self, fingerprint: &Fingerprint) -> DatastoreResult<DocMetaLookup>;

    /// Upsert a document's state file, fully replacing prior content.
    ///
    /// `data` must be non-empty and start with `{`; anything else fails
    /// without writing.
    async fn sync(&self, fingerprint: &Fingerprint, data: &str) -> DatastoreResult<()>;

    /// List all documents that have a state file, in directory-listing
    /// order. An absent data root yields an empty list.
    async fn get_doc_meta_files(&self) -> DatastoreResult<Vec<DocMetaRef>>;

    /// Remove a document's state file and its stash file, reporting each
    /// outcome independently.
    async fn delete(&self, doc_ref: &DeleteRef) -> DatastoreResult<DeleteResult>;

    /// Write an attachment payload and its metadata sidecar, overwriting
    /// any existing pair, and return the resulting descriptor.
    async fn add_file(
        &self,
        backend: Backend,
        name: &FileName,
        data: Bytes,
        meta: FileMeta,
    ) -> DatastoreResult<DatastoreFile>;

    /// Fetch an attachment descriptor, or `None` when the payload is
    /// absent.
    async fn get_file(
        &self,
        backend: Backend,
        name: &FileName,
    ) -> DatastoreResult<Option<DatastoreFile>>;

    /// Whether an attachment payload exists. Does not verify the sidecar.
    async fn contains_file(&self, backend: Backend, name: &FileName) -> DatastoreResult<bool>;

    /// List attachment names stored in a backend area, skipping metadata
    /// sidecars. An absent backend directory yields an empty list.
    async fn list_files(&self, backend: Backend) -> DatastoreResult<Vec<FileName>>;

    /// Write an original document into the stash area, returning its
    /// absolute path.
    async fn stash(&self, filename: &FileName, data: Bytes) -> DatastoreResult<PathBuf>;

    /// Verify the data root exists and is a directory.
    async fn health_check(&self) -> DatastoreResult<()>;
}
