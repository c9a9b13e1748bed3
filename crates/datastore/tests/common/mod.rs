//! Shared test fixtures.
#![allow(dead_code)]

use margin_core::DatastoreConfig;
use margin_datastore::{DataDirs, Datastore as _, DiskDatastore};
use std::path::Path;
use tempfile::TempDir;

/// A datastore rooted in a fresh temporary directory.
pub struct TestStore {
    pub store: DiskDatastore,
    /// Keeps the temporary directory alive for the store's lifetime.
    pub dir: TempDir,
}

/// Create and initialize a datastore under a fresh tempdir.
pub async fn test_store() -> TestStore {
    let dir = tempfile::tempdir().unwrap();
    let store = DiskDatastore::new(resolve_dirs(dir.path()));
    store.init().await.unwrap();
    TestStore { store, dir }
}

/// Resolve datastore roots under `base` without creating them.
pub fn resolve_dirs(base: &Path) -> DataDirs {
    let config = DatastoreConfig {
        base_dir: Some(base.to_path_buf()),
        ..DatastoreConfig::default()
    };
    DataDirs::resolve(&config).unwrap()
}
