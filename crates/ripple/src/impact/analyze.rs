//! Coarse impact classification for any operation.
//!
//! Each operation runs a fixed sequence of classification passes. Results are
//! merged first-write-wins: once an ID is recorded, later passes skip it.

use super::{ImpactAnalyzer, ImpactReport, ImpactType, ImpactedArtifact, Operation};
use crate::domain::{Artifact, ArtifactId};
use crate::error::Result;
use chrono::Utc;
use std::collections::HashSet;

/// Ordered, ID-deduplicated accumulator for impacted artifacts.
#[derive(Debug, Default)]
struct ImpactCollector {
    seen: HashSet<ArtifactId>,
    impacted: Vec<ImpactedArtifact>,
}

impl ImpactCollector {
    /// Record an impact unless the ID was already recorded.
    fn record(&mut self, artifact: Artifact, impact_type: ImpactType, reason: String) {
        if !self.seen.insert(artifact.id.clone()) {
            return;
        }
        self.impacted.push(ImpactedArtifact {
            id: artifact.id.clone(),
            artifact,
            impact_type,
            reason,
        });
    }

    fn into_vec(self) -> Vec<ImpactedArtifact> {
        self.impacted
    }
}

impl ImpactAnalyzer {
    /// Classify the artifacts affected by `operation` on `artifact_id`.
    ///
    /// - `cancel`: dependents (`breaks_dependency`), then dependencies
    ///   (`blocks_parent_completion`), then children (`orphans_children`)
    /// - `delete`: dependents (`breaks_dependency`), then children
    ///   (`orphans_children`); the target's own dependencies are never inspected
    /// - `remove_dependency`: the target itself, then every other artifact
    ///   sharing one of its dependencies (all `breaks_dependency`)
    ///
    /// Unknown IDs are not an error: lookups come back empty and the report
    /// has no impact.
    ///
    /// # Errors
    ///
    /// Only collaborator failures, propagated unmodified.
    pub async fn analyze(&self, artifact_id: &ArtifactId, operation: Operation) -> Result<ImpactReport> {
        tracing::debug!(artifact = %artifact_id, %operation, "Analyzing impact");

        let mut collector = ImpactCollector::default();
        match operation {
            Operation::Cancel => self.classify_cancel(artifact_id, &mut collector).await?,
            Operation::Delete => self.classify_delete(artifact_id, &mut collector).await?,
            Operation::RemoveDependency => {
                self.classify_remove_dependency(artifact_id, &mut collector)
                    .await?;
            }
        }

        let impacted_artifacts = collector.into_vec();
        Ok(ImpactReport {
            artifact_id: artifact_id.clone(),
            operation,
            has_impact: !impacted_artifacts.is_empty(),
            impacted_artifacts,
            analyzed_at: Utc::now(),
        })
    }

    async fn classify_cancel(&self, id: &ArtifactId, collector: &mut ImpactCollector) -> Result<()> {
        for dependent in self.index.get_blocked_artifacts(id).await? {
            collector.record(
                dependent,
                ImpactType::BreaksDependency,
                format!("Depends on {id} which is being canceled"),
            );
        }

        for dependency in self.index.get_dependencies(id).await? {
            collector.record(
                dependency,
                ImpactType::BlocksParentCompletion,
                format!("{id} (blocked artifact) is being canceled"),
            );
        }

        for child in self.find_children_in_hierarchy(id).await? {
            collector.record(
                child,
                ImpactType::OrphansChildren,
                format!("Parent {id} is being canceled"),
            );
        }

        Ok(())
    }

    async fn classify_delete(&self, id: &ArtifactId, collector: &mut ImpactCollector) -> Result<()> {
        for dependent in self.index.get_blocked_artifacts(id).await? {
            collector.record(
                dependent,
                ImpactType::BreaksDependency,
                format!("Depends on {id} which is being deleted"),
            );
        }

        for child in self.find_children_in_hierarchy(id).await? {
            collector.record(
                child,
                ImpactType::OrphansChildren,
                format!("Parent {id} is being deleted"),
            );
        }

        Ok(())
    }

    async fn classify_remove_dependency(
        &self,
        id: &ArtifactId,
        collector: &mut ImpactCollector,
    ) -> Result<()> {
        if let Some(artifact) = self.store.get(id).await? {
            collector.record(
                artifact,
                ImpactType::BreaksDependency,
                "Removing dependency may affect artifact readiness state".to_string(),
            );
        }

        for dependency in self.index.get_dependencies(id).await? {
            for sharer in self.index.get_blocked_artifacts(&dependency.id).await? {
                if &sharer.id == id {
                    continue;
                }
                collector.record(
                    sharer,
                    ImpactType::BreaksDependency,
                    format!("Shares dependency {} with {id}", dependency.id),
                );
            }
        }

        Ok(())
    }
}
