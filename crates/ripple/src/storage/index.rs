//! Dependency index backed by petgraph.
//!
//! The index reads the full artifact listing from an [`ArtifactStore`] on
//! first use and builds a directed graph from it. The graph is memoized until
//! [`DependencyIndex::clear_cache`] is called.
//!
//! ## Edge Direction Convention
//!
//! Edges point from **dependent -> dependency**: if `A.1.2` is blocked by
//! `A.1.1`, the edge is `A.1.2 -> A.1.1`. Outgoing edges therefore give
//! dependencies and incoming edges give dependents.
//!
//! References to IDs absent from the store never become edges.

use crate::domain::{Artifact, ArtifactFilter, ArtifactId};
use crate::error::Result;
use crate::storage::{ArtifactStore, DependencyIndex};
use async_trait::async_trait;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Snapshot of the store as a dependency graph.
#[derive(Debug)]
struct DependencyGraph {
    /// Nodes hold artifact IDs; edge source depends on edge target.
    graph: DiGraph<ArtifactId, ()>,

    /// Mapping from ArtifactId to graph NodeIndex.
    node_map: HashMap<ArtifactId, NodeIndex>,

    /// Full artifact records by ID.
    artifacts: HashMap<ArtifactId, Artifact>,
}

impl DependencyGraph {
    fn build(listing: Vec<Artifact>) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::with_capacity(listing.len());

        // First pass: add all nodes
        for artifact in &listing {
            let node = graph.add_node(artifact.id.clone());
            node_map.insert(artifact.id.clone(), node);
        }

        // Second pass: add edges for resolvable references
        for artifact in &listing {
            let from = node_map[&artifact.id];
            for dep in artifact.dependencies() {
                match node_map.get(dep) {
                    Some(&to) => {
                        graph.update_edge(from, to, ());
                    }
                    None => {
                        tracing::trace!(from = %artifact.id, to = %dep, "Skipping dangling dependency");
                    }
                }
            }
        }

        let artifacts = listing.into_iter().map(|a| (a.id.clone(), a)).collect();

        Self {
            graph,
            node_map,
            artifacts,
        }
    }

    fn dependencies(&self, id: &ArtifactId) -> Vec<Artifact> {
        let Some(artifact) = self.artifacts.get(id) else {
            return Vec::new();
        };

        // Walk blocked_by rather than edges to keep declaration order
        let mut seen = HashSet::new();
        artifact
            .dependencies()
            .iter()
            .filter(|dep| seen.insert(*dep))
            .filter_map(|dep| self.artifacts.get(dep).cloned())
            .collect()
    }

    fn dependents(&self, id: &ArtifactId) -> Vec<Artifact> {
        let Some(&node) = self.node_map.get(id) else {
            return Vec::new();
        };

        let mut ids: Vec<&ArtifactId> = self
            .graph
            .neighbors_directed(node, Direction::Incoming)
            .map(|idx| &self.graph[idx])
            .collect();
        ids.sort();
        ids.dedup();

        ids.into_iter()
            .filter_map(|dep_id| self.artifacts.get(dep_id).cloned())
            .collect()
    }
}

/// [`DependencyIndex`] over any [`ArtifactStore`], with a lazily built,
/// memoized petgraph snapshot.
pub struct GraphDependencyIndex {
    store: Arc<dyn ArtifactStore>,
    cache: RwLock<Option<Arc<DependencyGraph>>>,
}

impl std::fmt::Debug for GraphDependencyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphDependencyIndex")
            .field("store", &"<dyn ArtifactStore>")
            .finish_non_exhaustive()
    }
}

impl GraphDependencyIndex {
    /// Create an index over the given store. Nothing is read until the first lookup.
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            store,
            cache: RwLock::new(None),
        }
    }

    /// Get the memoized graph, building it from the store if needed.
    ///
    /// Concurrent first use may build the graph more than once; the cache is
    /// always replaced wholesale.
    async fn graph(&self) -> Result<Arc<DependencyGraph>> {
        let cached = self.cache.read().await.clone();
        if let Some(graph) = cached {
            return Ok(graph);
        }

        let listing = self.store.find_artifacts(&ArtifactFilter::default()).await?;
        tracing::debug!(artifacts = listing.len(), "Building dependency graph");
        let graph = Arc::new(DependencyGraph::build(listing));

        *self.cache.write().await = Some(Arc::clone(&graph));
        Ok(graph)
    }
}

#[async_trait]
impl DependencyIndex for GraphDependencyIndex {
    async fn get_dependencies(&self, id: &ArtifactId) -> Result<Vec<Artifact>> {
        Ok(self.graph().await?.dependencies(id))
    }

    async fn get_blocked_artifacts(&self, id: &ArtifactId) -> Result<Vec<Artifact>> {
        Ok(self.graph().await?.dependents(id))
    }

    async fn clear_cache(&self) {
        tracing::debug!("Clearing dependency graph cache");
        *self.cache.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryArtifactStore;

    fn ids(artifacts: &[Artifact]) -> Vec<&str> {
        artifacts.iter().map(|a| a.id.as_str()).collect()
    }

    fn chain_store() -> InMemoryArtifactStore {
        InMemoryArtifactStore::from_artifacts([
            Artifact::new("A.1.1"),
            Artifact::new("A.1.2").blocked_by("A.1.1"),
            Artifact::new("A.1.3").blocked_by("A.1.2").blocked_by("A.1.1"),
        ])
    }

    #[tokio::test]
    async fn dependencies_follow_blocked_by_order() {
        let index = GraphDependencyIndex::new(Arc::new(chain_store()));

        let deps = index.get_dependencies(&ArtifactId::new("A.1.3")).await.unwrap();
        assert_eq!(ids(&deps), vec!["A.1.2", "A.1.1"]);
    }

    #[tokio::test]
    async fn dependents_are_sorted() {
        let index = GraphDependencyIndex::new(Arc::new(chain_store()));

        let dependents = index
            .get_blocked_artifacts(&ArtifactId::new("A.1.1"))
            .await
            .unwrap();
        assert_eq!(ids(&dependents), vec!["A.1.2", "A.1.3"]);
    }

    #[tokio::test]
    async fn dangling_references_are_invisible() {
        let store = InMemoryArtifactStore::from_artifacts([
            Artifact::new("A.1").blocked_by("Z.9").blocked_by("A.2"),
            Artifact::new("A.2"),
        ]);
        let index = GraphDependencyIndex::new(Arc::new(store));

        let deps = index.get_dependencies(&ArtifactId::new("A.1")).await.unwrap();
        assert_eq!(ids(&deps), vec!["A.2"]);

        let dependents = index
            .get_blocked_artifacts(&ArtifactId::new("Z.9"))
            .await
            .unwrap();
        assert!(dependents.is_empty());
    }

    #[tokio::test]
    async fn unknown_ids_yield_nothing() {
        let index = GraphDependencyIndex::new(Arc::new(chain_store()));
        let missing = ArtifactId::new("Q");

        assert!(index.get_dependencies(&missing).await.unwrap().is_empty());
        assert!(index.get_blocked_artifacts(&missing).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_references_collapse() {
        let store = InMemoryArtifactStore::from_artifacts([
            Artifact::new("A.1"),
            Artifact::new("A.2").blocked_by("A.1").blocked_by("A.1"),
        ]);
        let index = GraphDependencyIndex::new(Arc::new(store));

        let deps = index.get_dependencies(&ArtifactId::new("A.2")).await.unwrap();
        assert_eq!(ids(&deps), vec!["A.1"]);
        let dependents = index
            .get_blocked_artifacts(&ArtifactId::new("A.1"))
            .await
            .unwrap();
        assert_eq!(ids(&dependents), vec!["A.2"]);
    }

    #[tokio::test]
    async fn cache_is_stale_until_cleared() {
        let store = chain_store();
        let index = GraphDependencyIndex::new(Arc::new(store.clone()));
        let root = ArtifactId::new("A.1.1");

        assert_eq!(index.get_blocked_artifacts(&root).await.unwrap().len(), 2);

        store.insert(Artifact::new("A.1.4").blocked_by("A.1.1")).await;
        assert_eq!(index.get_blocked_artifacts(&root).await.unwrap().len(), 2);

        index.clear_cache().await;
        assert_eq!(index.get_blocked_artifacts(&root).await.unwrap().len(), 3);
    }
}
