//! In-memory artifact store.
//!
//! Artifacts live in a `BTreeMap` keyed by [`ArtifactId`], so listings come
//! back in natural ID order (`A.2` before `A.10`). The map is wrapped in
//! `Arc<RwLock<>>`; clones share the same data, which lets a test or a
//! long-lived process mutate the store while an analyzer holds a handle to it.
//!
//! # Persistence
//!
//! Use [`load_from_jsonl`] to populate a store from a JSON Lines file where
//! each line is one serialized [`Artifact`].

mod jsonl;

use crate::domain::{Artifact, ArtifactFilter, ArtifactId};
use crate::error::Result;
use crate::storage::ArtifactStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub use jsonl::{LoadWarning, load_from_jsonl};

/// Thread-safe in-memory artifact store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtifactStore {
    artifacts: Arc<RwLock<BTreeMap<ArtifactId, Artifact>>>,
}

impl InMemoryArtifactStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given artifacts.
    ///
    /// Later artifacts replace earlier ones with the same ID.
    pub fn from_artifacts(artifacts: impl IntoIterator<Item = Artifact>) -> Self {
        let map = artifacts
            .into_iter()
            .map(|artifact| (artifact.id.clone(), artifact))
            .collect();
        Self {
            artifacts: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert or replace an artifact, returning the previous value.
    pub async fn insert(&self, artifact: Artifact) -> Option<Artifact> {
        let mut artifacts = self.artifacts.write().await;
        artifacts.insert(artifact.id.clone(), artifact)
    }

    /// Remove an artifact, returning it if it existed.
    pub async fn remove(&self, id: &ArtifactId) -> Option<Artifact> {
        let mut artifacts = self.artifacts.write().await;
        artifacts.remove(id)
    }

    /// Number of artifacts in the store.
    pub async fn len(&self) -> usize {
        self.artifacts.read().await.len()
    }

    /// Returns true if the store holds no artifacts.
    pub async fn is_empty(&self) -> bool {
        self.artifacts.read().await.is_empty()
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn find_artifacts(&self, filter: &ArtifactFilter) -> Result<Vec<Artifact>> {
        let artifacts = self.artifacts.read().await;
        let matching = artifacts.values().filter(|a| filter.matches(a)).cloned();

        Ok(match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }

    async fn get(&self, id: &ArtifactId) -> Result<Option<Artifact>> {
        let artifacts = self.artifacts.read().await;
        Ok(artifacts.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(artifacts: &[Artifact]) -> Vec<&str> {
        artifacts.iter().map(|a| a.id.as_str()).collect()
    }

    #[tokio::test]
    async fn listing_is_naturally_ordered() {
        let store = InMemoryArtifactStore::from_artifacts([
            Artifact::new("A.10"),
            Artifact::new("A.2"),
            Artifact::new("A"),
        ]);

        let all = store.find_artifacts(&ArtifactFilter::default()).await.unwrap();
        assert_eq!(ids(&all), vec!["A", "A.2", "A.10"]);
    }

    #[tokio::test]
    async fn zero_padded_ids_occupy_separate_slots() {
        let store = InMemoryArtifactStore::new();
        store.insert(Artifact::new("A.1").with_title("one")).await;
        let replaced = store.insert(Artifact::new("A.01").with_title("zero-one")).await;

        assert!(replaced.is_none());
        assert_eq!(store.len().await, 2);
        let one = store.get(&ArtifactId::new("A.1")).await.unwrap().unwrap();
        assert_eq!(one.title.as_deref(), Some("one"));
    }

    #[tokio::test]
    async fn filter_prefix_and_limit() {
        let store = InMemoryArtifactStore::from_artifacts([
            Artifact::new("A.1"),
            Artifact::new("A.2"),
            Artifact::new("B.1"),
        ]);

        let filter = ArtifactFilter {
            id_prefix: Some("A.".to_string()),
            limit: Some(1),
        };
        let found = store.find_artifacts(&filter).await.unwrap();
        assert_eq!(ids(&found), vec!["A.1"]);
    }

    #[tokio::test]
    async fn clones_share_data() {
        let store = InMemoryArtifactStore::new();
        let handle = store.clone();

        handle.insert(Artifact::new("A")).await;
        assert!(store.get(&ArtifactId::new("A")).await.unwrap().is_some());

        assert!(store.remove(&ArtifactId::new("A")).await.is_some());
        assert!(handle.is_empty().await);
    }
}
