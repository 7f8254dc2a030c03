//! Impact analysis for destructive artifact operations.
//!
//! The [`ImpactAnalyzer`] answers "what else breaks if I do this?" for three
//! operations on one artifact: `cancel`, `delete` and `remove_dependency`.
//! It is read-only and advisory: it never mutates the store and never vetoes
//! an operation. `has_impact` and `requires_force` are signals for the caller.
//!
//! # Entry Points
//!
//! - [`ImpactAnalyzer::analyze`]: coarse classification into
//!   [`ImpactType`]s, for any operation. Never fails for unknown IDs.
//! - [`ImpactAnalyzer::analyze_cancellation`]: parent completion, unblocked
//!   dependents, untouched children.
//! - [`ImpactAnalyzer::analyze_deletion`]: orphaned dependents and children,
//!   the broken parent and its remaining siblings.
//!
//! The precise entry points require the target to exist and fail with
//! [`Error::ArtifactNotFound`] otherwise.
//!
//! # Hierarchy
//!
//! Parent/child structure comes from dotted IDs (`A.1` is the parent of
//! `A.1.2`). Only direct children count; every analysis looks one hop away,
//! so dependency cycles cannot cause unbounded work.
//!
//! # Caching
//!
//! Each analyzer memoizes the full artifact listing on first need. The cache
//! is instance-scoped and only invalidated by [`ImpactAnalyzer::clear_cache`],
//! which also clears the dependency index.
//!
//! [`Error::ArtifactNotFound`]: crate::error::Error::ArtifactNotFound

mod analyze;
mod cancellation;
mod deletion;
mod types;

pub use types::{
    AffectedSibling, BrokenParent, CancellationImpactReport, DeletionImpactReport,
    DependentUnblocked, ImpactReport, ImpactType, ImpactedArtifact, Operation, OrphanedChild,
    OrphanedDependent, ParentCompletionImpact, RelatedArtifact,
};

use crate::domain::{Artifact, ArtifactFilter, ArtifactId};
use crate::error::{Error, Result};
use crate::storage::{ArtifactStore, DependencyIndex, GraphDependencyIndex};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Analyzes the ripple effects of destructive operations on artifacts.
pub struct ImpactAnalyzer {
    store: Arc<dyn ArtifactStore>,
    index: Arc<dyn DependencyIndex>,

    /// Memoized full listing; replaced wholesale, never mutated in place.
    listing: RwLock<Option<Arc<Vec<Artifact>>>>,
}

impl std::fmt::Debug for ImpactAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImpactAnalyzer")
            .field("store", &"<dyn ArtifactStore>")
            .field("index", &"<dyn DependencyIndex>")
            .finish_non_exhaustive()
    }
}

impl ImpactAnalyzer {
    /// Create an analyzer over explicit store and index collaborators.
    pub fn new(store: Arc<dyn ArtifactStore>, index: Arc<dyn DependencyIndex>) -> Self {
        Self {
            store,
            index,
            listing: RwLock::new(None),
        }
    }

    /// Create an analyzer with a [`GraphDependencyIndex`] over `store`.
    pub fn with_store(store: Arc<dyn ArtifactStore>) -> Self {
        let index = Arc::new(GraphDependencyIndex::new(Arc::clone(&store)));
        Self::new(store, index)
    }

    /// Direct children of `id` in the dotted hierarchy, in listing order.
    ///
    /// Reads the memoized listing; the store is only queried on first use
    /// or after [`clear_cache`](Self::clear_cache).
    pub async fn find_children_in_hierarchy(&self, id: &ArtifactId) -> Result<Vec<Artifact>> {
        let listing = self.listing().await?;
        Ok(direct_children(&listing, id))
    }

    /// Invalidate the memoized listing and the dependency index cache.
    ///
    /// Long-lived analyzers call this when the store may have changed
    /// between calls.
    pub async fn clear_cache(&self) {
        tracing::debug!("Clearing impact analyzer cache");
        *self.listing.write().await = None;
        self.index.clear_cache().await;
    }

    /// Get the memoized listing, loading it from the store if needed.
    async fn listing(&self) -> Result<Arc<Vec<Artifact>>> {
        let cached = self.listing.read().await.clone();
        if let Some(listing) = cached {
            return Ok(listing);
        }

        let listing = Arc::new(self.store.find_artifacts(&ArtifactFilter::default()).await?);
        tracing::debug!(artifacts = listing.len(), "Loaded artifact listing");

        *self.listing.write().await = Some(Arc::clone(&listing));
        Ok(listing)
    }

    /// Children of `id`'s parent, excluding `id` itself.
    ///
    /// Empty for root IDs.
    async fn siblings(&self, id: &ArtifactId) -> Result<Vec<Artifact>> {
        let Some(parent_id) = id.parent() else {
            return Ok(Vec::new());
        };
        let mut siblings = self.find_children_in_hierarchy(&parent_id).await?;
        siblings.retain(|sibling| &sibling.id != id);
        Ok(siblings)
    }

    /// Fetch an artifact that must exist.
    async fn require(&self, id: &ArtifactId) -> Result<Artifact> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| Error::ArtifactNotFound(id.clone()))
    }
}

/// Filter a listing down to the direct children of `id`.
pub(crate) fn direct_children(listing: &[Artifact], id: &ArtifactId) -> Vec<Artifact> {
    listing
        .iter()
        .filter(|artifact| artifact.id.is_direct_child_of(id))
        .cloned()
        .collect()
}

/// Structural count of `artifact`'s dependencies other than `excluded`.
pub(crate) fn remaining_dependencies(artifact: &Artifact, excluded: &ArtifactId) -> usize {
    artifact
        .dependencies()
        .iter()
        .filter(|dep| *dep != excluded)
        .count()
}

/// `"1 child"`, `"3 children"`.
pub(crate) fn count_noun(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryArtifactStore, UnavailableStore};

    fn ids(artifacts: &[Artifact]) -> Vec<&str> {
        artifacts.iter().map(|a| a.id.as_str()).collect()
    }

    fn analyzer(artifacts: impl IntoIterator<Item = Artifact>) -> ImpactAnalyzer {
        ImpactAnalyzer::with_store(Arc::new(InMemoryArtifactStore::from_artifacts(artifacts)))
    }

    #[tokio::test]
    async fn children_exclude_deeper_descendants() {
        let analyzer = analyzer([
            Artifact::new("A"),
            Artifact::new("A.1"),
            Artifact::new("A.1.1"),
            Artifact::new("A.2"),
            Artifact::new("AB.1"),
        ]);

        let children = analyzer
            .find_children_in_hierarchy(&ArtifactId::new("A"))
            .await
            .unwrap();
        assert_eq!(ids(&children), vec!["A.1", "A.2"]);
    }

    #[tokio::test]
    async fn listing_is_memoized_until_cleared() {
        let store = InMemoryArtifactStore::from_artifacts([Artifact::new("A"), Artifact::new("A.1")]);
        let analyzer = ImpactAnalyzer::with_store(Arc::new(store.clone()));
        let root = ArtifactId::new("A");

        assert_eq!(analyzer.find_children_in_hierarchy(&root).await.unwrap().len(), 1);

        store.insert(Artifact::new("A.2")).await;
        assert_eq!(analyzer.find_children_in_hierarchy(&root).await.unwrap().len(), 1);

        analyzer.clear_cache().await;
        assert_eq!(analyzer.find_children_in_hierarchy(&root).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn analyzers_do_not_share_caches() {
        let store = InMemoryArtifactStore::from_artifacts([Artifact::new("A")]);
        let first = ImpactAnalyzer::with_store(Arc::new(store.clone()));
        let root = ArtifactId::new("A");

        assert!(first.find_children_in_hierarchy(&root).await.unwrap().is_empty());

        store.insert(Artifact::new("A.1")).await;
        let second = ImpactAnalyzer::with_store(Arc::new(store.clone()));

        assert!(first.find_children_in_hierarchy(&root).await.unwrap().is_empty());
        assert_eq!(second.find_children_in_hierarchy(&root).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn siblings_exclude_self() {
        let analyzer = analyzer([
            Artifact::new("A.1"),
            Artifact::new("A.1.1"),
            Artifact::new("A.1.2"),
            Artifact::new("A.1.3"),
        ]);

        let siblings = analyzer.siblings(&ArtifactId::new("A.1.2")).await.unwrap();
        assert_eq!(ids(&siblings), vec!["A.1.1", "A.1.3"]);
        assert!(analyzer.siblings(&ArtifactId::new("A")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let analyzer = ImpactAnalyzer::new(Arc::new(UnavailableStore::new()), Arc::new(UnavailableStore::new()));

        let err = analyzer
            .find_children_in_hierarchy(&ArtifactId::new("A"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn count_noun_pluralizes() {
        assert_eq!(count_noun(1, "child", "children"), "1 child");
        assert_eq!(count_noun(0, "child", "children"), "0 children");
        assert_eq!(count_noun(2, "blocker", "blockers"), "2 blockers");
    }

    #[test]
    fn remaining_dependencies_is_structural() {
        let artifact = Artifact::new("A.3").blocked_by("A.1").blocked_by("A.2");
        assert_eq!(remaining_dependencies(&artifact, &ArtifactId::new("A.1")), 1);
        assert_eq!(remaining_dependencies(&artifact, &ArtifactId::new("Z")), 2);
    }
}
