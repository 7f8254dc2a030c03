//! Application context for CLI command execution.
//!
//! # Example
//!
//! ```no_run
//! use ripple::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     let report = app.analyzer().analyze_deletion(&"A.1".parse()?).await?;
//!     println!("{}", report.summary);
//!     Ok(())
//! }
//! ```

use crate::config::{CONFIG_FILE_NAME, RIPPLE_DIR_NAME, RippleConfig, find_ripple_root};
use crate::error::{ConfigError, Result};
use crate::impact::ImpactAnalyzer;
use crate::storage::{InMemoryArtifactStore, LoadWarning, StorageBackend, open_store};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application context for CLI operations.
///
/// Owns the loaded store and one analyzer over it. The analyzer's caches
/// live as long as the `App`.
#[derive(Debug)]
pub struct App {
    store: Arc<InMemoryArtifactStore>,
    analyzer: ImpactAnalyzer,
    data_path: Option<PathBuf>,
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree to find a `.ripple/` directory,
    /// loads configuration, and loads the configured data file. A missing
    /// config file falls back to the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No ripple repository is found in the directory tree
    /// - Configuration cannot be parsed or names an unknown backend
    /// - The data file cannot be read
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_ripple_root(working_dir).ok_or(ConfigError::NotInitialized)?;
        let config_path = root_dir.join(RIPPLE_DIR_NAME).join(CONFIG_FILE_NAME);

        let config = if tokio::fs::try_exists(&config_path).await? {
            RippleConfig::load(&config_path).await?
        } else {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            RippleConfig::default()
        };

        Self::from_backend(config.storage.to_backend(&root_dir)?).await
    }

    /// Create an App over an explicit JSONL data file, bypassing discovery.
    pub async fn from_data_file(path: &Path) -> Result<Self> {
        Self::from_backend(StorageBackend::Jsonl(path.to_path_buf())).await
    }

    /// Create an App over an already-populated store.
    pub fn from_store(store: InMemoryArtifactStore) -> Self {
        let store = Arc::new(store);
        Self {
            analyzer: ImpactAnalyzer::with_store(store.clone()),
            store,
            data_path: None,
        }
    }

    async fn from_backend(backend: StorageBackend) -> Result<Self> {
        let data_path = Some(backend.data_path().to_path_buf());
        let (store, warnings) = open_store(backend).await?;
        report_load_warnings(&warnings);

        let mut app = Self::from_store(store);
        app.data_path = data_path;
        Ok(app)
    }

    /// The impact analyzer over the loaded store.
    pub fn analyzer(&self) -> &ImpactAnalyzer {
        &self.analyzer
    }

    /// The loaded store.
    pub fn store(&self) -> &InMemoryArtifactStore {
        &self.store
    }

    /// Path of the data file backing the store, if any.
    pub fn data_path(&self) -> Option<&Path> {
        self.data_path.as_deref()
    }
}

fn report_load_warnings(warnings: &[LoadWarning]) {
    for warning in warnings {
        match warning {
            LoadWarning::MalformedJson { line_number, error } => {
                tracing::warn!(line = line_number, %error, "Skipping malformed line");
            }
            LoadWarning::DuplicateArtifact { id, line_number } => {
                tracing::warn!(artifact = %id, line = line_number, "Skipping duplicate artifact");
            }
            LoadWarning::DanglingDependency { from, to } => {
                tracing::warn!(artifact = %from, missing = %to, "Dependency on unknown artifact");
            }
        }
    }
}
