//! Directory resolution for the datastore roots.

use crate::error::{DatastoreError, DatastoreResult};
use margin_core::DatastoreConfig;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Resolved root directories for the datastore.
///
/// The data root holds one directory per document fingerprint; the stash,
/// files, and logs roots are named subareas beneath it. Paths are
/// absolutized at resolution time so that descriptor URLs can be built
/// from them. [`DataDirs::init`] must run once before the datastore
/// touches any of these paths.
#[derive(Clone, Debug)]
pub struct DataDirs {
    data_dir: PathBuf,
    stash_dir: PathBuf,
    files_dir: PathBuf,
    logs_dir: PathBuf,
}

impl DataDirs {
    /// Resolve the datastore roots from configuration.
    pub fn resolve(config: &DatastoreConfig) -> DatastoreResult<Self> {
        config.validate().map_err(DatastoreError::Config)?;

        let base = config.resolve_base_dir().ok_or_else(|| {
            DatastoreError::InvalidPath(
                "no base directory configured and no platform data directory available"
                    .to_string(),
            )
        })?;
        let base = std::path::absolute(&base)?;

        Ok(Self {
            stash_dir: base.join(&config.stash_dir_name),
            files_dir: base.join(&config.files_dir_name),
            logs_dir: base.join(&config.logs_dir_name),
            data_dir: base,
        })
    }

    /// Create any missing root directories.
    pub async fn init(&self) -> DatastoreResult<()> {
        for dir in [
            &self.data_dir,
            &self.stash_dir,
            &self.files_dir,
            &self.logs_dir,
        ] {
            fs::create_dir_all(dir).await?;
        }
        Ok(())
    }

    /// Root directory holding per-document state.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory holding original (as-imported) document files.
    pub fn stash_dir(&self) -> &Path {
        &self.stash_dir
    }

    /// Directory holding attachment files, one subarea per backend.
    pub fn files_dir(&self) -> &Path {
        &self.files_dir
    }

    /// Directory holding log files.
    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_base(base: &Path) -> DatastoreConfig {
        DatastoreConfig {
            base_dir: Some(base.to_path_buf()),
            ..DatastoreConfig::default()
        }
    }

    #[test]
    fn test_resolve_joins_subareas_under_base() {
        let temp = tempfile::tempdir().unwrap();
        let dirs = DataDirs::resolve(&config_with_base(temp.path())).unwrap();

        assert_eq!(dirs.stash_dir(), dirs.data_dir().join("stash"));
        assert_eq!(dirs.files_dir(), dirs.data_dir().join("files"));
        assert_eq!(dirs.logs_dir(), dirs.data_dir().join("logs"));
    }

    #[test]
    fn test_resolve_rejects_invalid_config() {
        let temp = tempfile::tempdir().unwrap();
        let config = DatastoreConfig {
            files_dir_name: "files/nested".to_string(),
            ..config_with_base(temp.path())
        };

        match DataDirs::resolve(&config) {
            Err(DatastoreError::Config(_)) => {}
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_init_creates_all_roots() {
        let temp = tempfile::tempdir().unwrap();
        let dirs = DataDirs::resolve(&config_with_base(&temp.path().join("nested"))).unwrap();

        dirs.init().await.unwrap();

        assert!(dirs.data_dir().is_dir());
        assert!(dirs.stash_dir().is_dir());
        assert!(dirs.files_dir().is_dir());
        assert!(dirs.logs_dir().is_dir());
    }
}
