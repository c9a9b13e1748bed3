//! Configuration types for the datastore.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Datastore configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatastoreConfig {
    /// Base directory for all datastore state. When unset, the platform
    /// application-data directory is used.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
    /// Subdirectory holding original (as-imported) document files.
    #[serde(default = "default_stash_dir_name")]
    pub stash_dir_name: String,
    /// Subdirectory holding attachment files, one subarea per backend.
    #[serde(default = "default_files_dir_name")]
    pub files_dir_name: String,
    /// Subdirectory holding log files.
    #[serde(default = "default_logs_dir_name")]
    pub logs_dir_name: String,
}

fn default_stash_dir_name() -> String {
    "stash".to_string()
}

fn default_files_dir_name() -> String {
    "files".to_string()
}

fn default_logs_dir_name() -> String {
    "logs".to_string()
}

impl Default for DatastoreConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            stash_dir_name: default_stash_dir_name(),
            files_dir_name: default_files_dir_name(),
            logs_dir_name: default_logs_dir_name(),
        }
    }
}

impl DatastoreConfig {
    /// Resolve the base data directory, falling back to the platform
    /// application-data directory.
    pub fn resolve_base_dir(&self) -> Option<PathBuf> {
        match &self.base_dir {
            Some(dir) => Some(dir.clone()),
            None => directories::ProjectDirs::from("", "", "margin")
                .map(|dirs| dirs.data_dir().to_path_buf()),
        }
    }

    /// Validate configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        for name in [
            &self.stash_dir_name,
            &self.files_dir_name,
            &self.logs_dir_name,
        ] {
            if name.is_empty() {
                return Err("subdirectory names cannot be empty".to_string());
            }
            if name.contains('/') || name.contains('\\') {
                return Err(format!(
                    "subdirectory name cannot contain path separators: {name}"
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_subdir_names() {
        let config = DatastoreConfig::default();
        assert_eq!(config.stash_dir_name, "stash");
        assert_eq!(config.files_dir_name, "files");
        assert_eq!(config.logs_dir_name, "logs");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: DatastoreConfig = serde_json::from_str(r#"{}"#).unwrap();
        assert!(config.base_dir.is_none());
        assert_eq!(config.files_dir_name, "files");
    }

    #[test]
    fn test_explicit_base_dir_wins() {
        let config = DatastoreConfig {
            base_dir: Some(PathBuf::from("/tmp/margin-data")),
            ..DatastoreConfig::default()
        };
        assert_eq!(
            config.resolve_base_dir(),
            Some(PathBuf::from("/tmp/margin-data"))
        );
    }

    #[test]
    fn test_validate_rejects_separator_in_subdir_name() {
        let config = DatastoreConfig {
            stash_dir_name: "stash/extra".to_string(),
            ..DatastoreConfig::default()
        };
        assert!(config.validate().is_err());

        let config = DatastoreConfig {
            logs_dir_name: String::new(),
            ..DatastoreConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
