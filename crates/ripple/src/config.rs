//! Configuration management for ripple.
//!
//! A ripple repository is a directory containing `.ripple/config.yaml`:
//!
//! ```yaml
//! storage:
//!   backend: memory
//!   data_file: .ripple/artifacts.jsonl
//! ```
//!
//! `data_file` is resolved relative to the repository root.

use crate::error::{ConfigError, Result, StorageError};
use crate::storage::StorageBackend;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the ripple directory
pub const RIPPLE_DIR_NAME: &str = ".ripple";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the default artifacts data file
pub const ARTIFACTS_FILE_NAME: &str = "artifacts.jsonl";

/// Maximum directory depth to traverse when searching for the ripple root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for ripple
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RippleConfig {
    /// Storage configuration
    pub storage: StorageConfig,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Storage backend type ("memory" for in-memory loaded from JSONL)
    pub backend: String,

    /// Path to the data file
    pub data_file: String,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                backend: "memory".to_string(),
                data_file: format!("{RIPPLE_DIR_NAME}/{ARTIFACTS_FILE_NAME}"),
            },
        }
    }
}

impl RippleConfig {
    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Save configuration to a file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, content).await?;
        Ok(())
    }
}

impl StorageConfig {
    /// Convert to a [`StorageBackend`], resolving `data_file` against `root_dir`.
    pub fn to_backend(&self, root_dir: &Path) -> Result<StorageBackend> {
        match self.backend.as_str() {
            "memory" | "jsonl" => Ok(StorageBackend::Jsonl(root_dir.join(&self.data_file))),
            other => Err(StorageError::UnsupportedBackend(other.to_string()).into()),
        }
    }
}

/// Find the ripple root by walking up from `start_dir`.
///
/// Returns the first directory containing `.ripple/`, or `None`.
pub fn find_ripple_root(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .take(MAX_TRAVERSAL_DEPTH)
        .find(|dir| dir.join(RIPPLE_DIR_NAME).is_dir())
        .map(Path::to_path_buf)
}
