//! Storage abstraction layer for ripple.
//!
//! The impact analyzer never owns artifact data. It reads through two
//! collaborator traits:
//!
//! - [`ArtifactStore`]: artifacts keyed by dotted hierarchical ID, with a
//!   listing query
//! - [`DependencyIndex`]: forward (`blocked_by`) and reverse (dependents)
//!   lookups over the store
//!
//! Bundled implementations:
//!
//! - [`in_memory::InMemoryArtifactStore`]: ordered map of artifacts, optionally
//!   loaded from a JSONL file
//! - [`index::GraphDependencyIndex`]: petgraph-backed index built lazily from
//!   any store
//!
//! # Architecture
//!
//! Both traits are async and object-safe so that analyzers can hold
//! `Arc<dyn ArtifactStore>` / `Arc<dyn DependencyIndex>` regardless of the
//! backend. All methods take `&self`; implementations use interior
//! mutability for caches.
//!
//! # Test Utilities
//!
//! [`UnavailableStore`] fails every call and is available under `cfg(test)`
//! or the `test-util` feature, for exercising error propagation.

use crate::domain::{Artifact, ArtifactFilter, ArtifactId};
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub mod in_memory;
pub mod index;

pub use in_memory::{InMemoryArtifactStore, LoadWarning, load_from_jsonl};
pub use index::GraphDependencyIndex;

/// Read access to the artifact collection.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// List artifacts matching the filter, ordered by ID.
    ///
    /// The default filter returns every artifact.
    async fn find_artifacts(&self, filter: &ArtifactFilter) -> Result<Vec<Artifact>>;

    /// Get an artifact by ID.
    ///
    /// Returns `None` if the artifact doesn't exist.
    async fn get(&self, id: &ArtifactId) -> Result<Option<Artifact>>;
}

/// Dependency lookups over an artifact collection.
///
/// Edges come from `relationships.blocked_by`. References to artifacts that
/// are not in the store are dropped from every result.
#[async_trait]
pub trait DependencyIndex: Send + Sync {
    /// Artifacts that `id` depends on, in `blocked_by` order.
    ///
    /// Returns an empty list for unknown IDs.
    async fn get_dependencies(&self, id: &ArtifactId) -> Result<Vec<Artifact>>;

    /// Artifacts whose `blocked_by` contains `id` (its direct dependents).
    ///
    /// Returns an empty list for unknown IDs.
    async fn get_blocked_artifacts(&self, id: &ArtifactId) -> Result<Vec<Artifact>>;

    /// Drop any cached index state so the next lookup re-reads the store.
    async fn clear_cache(&self);
}

/// Storage backend configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageBackend {
    /// In-memory store loaded from a JSONL file
    Jsonl(PathBuf),
}

impl StorageBackend {
    /// Returns the data file path backing the store.
    pub fn data_path(&self) -> &Path {
        match self {
            StorageBackend::Jsonl(path) => path,
        }
    }
}

/// Open a store for the given backend.
///
/// A JSONL backend whose file does not exist yet yields an empty store.
/// Load warnings are returned alongside the store for the caller to report.
pub async fn open_store(
    backend: StorageBackend,
) -> Result<(InMemoryArtifactStore, Vec<LoadWarning>)> {
    match backend {
        StorageBackend::Jsonl(path) => {
            if tokio::fs::try_exists(&path).await? {
                load_from_jsonl(&path).await
            } else {
                tracing::debug!(path = %path.display(), "Data file missing, starting empty");
                Ok((InMemoryArtifactStore::new(), Vec::new()))
            }
        }
    }
}

// ========== Test Utilities ==========

/// A store whose every call fails with [`StorageError::Unavailable`].
///
/// Used to verify that collaborator failures propagate unmodified.
///
/// [`StorageError::Unavailable`]: crate::error::StorageError::Unavailable
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct UnavailableStore;

#[cfg(any(test, feature = "test-util"))]
impl UnavailableStore {
    /// Create a new UnavailableStore instance.
    pub fn new() -> Self {
        Self
    }

    fn error() -> crate::error::Error {
        crate::error::StorageError::Unavailable("store offline".to_string()).into()
    }
}

#[cfg(any(test, feature = "test-util"))]
#[async_trait]
impl ArtifactStore for UnavailableStore {
    async fn find_artifacts(&self, _filter: &ArtifactFilter) -> Result<Vec<Artifact>> {
        Err(Self::error())
    }

    async fn get(&self, _id: &ArtifactId) -> Result<Option<Artifact>> {
        Err(Self::error())
    }
}

#[cfg(any(test, feature = "test-util"))]
#[async_trait]
impl DependencyIndex for UnavailableStore {
    async fn get_dependencies(&self, _id: &ArtifactId) -> Result<Vec<Artifact>> {
        Err(Self::error())
    }

    async fn get_blocked_artifacts(&self, _id: &ArtifactId) -> Result<Vec<Artifact>> {
        Err(Self::error())
    }

    async fn clear_cache(&self) {}
}
