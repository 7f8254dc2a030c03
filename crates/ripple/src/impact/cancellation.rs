//! Precise cancellation analysis.

use super::{
    CancellationImpactReport, DependentUnblocked, ImpactAnalyzer, ParentCompletionImpact,
    RelatedArtifact, count_noun, remaining_dependencies,
};
use crate::domain::ArtifactId;
use crate::error::Result;
use chrono::Utc;

impl ImpactAnalyzer {
    /// Analyze what cancelling `artifact_id` changes for its parent,
    /// dependents and children.
    ///
    /// # Errors
    ///
    /// Returns `Error::ArtifactNotFound` if the artifact doesn't exist.
    pub async fn analyze_cancellation(
        &self,
        artifact_id: &ArtifactId,
    ) -> Result<CancellationImpactReport> {
        self.require(artifact_id).await?;
        tracing::debug!(artifact = %artifact_id, "Analyzing cancellation");

        let parent_completion_affected = self.parent_completion(artifact_id).await?;
        let dependents_unblocked = self.dependents_unblocked(artifact_id).await?;
        let children: Vec<RelatedArtifact> = self
            .find_children_in_hierarchy(artifact_id)
            .await?
            .into_iter()
            .map(RelatedArtifact::from)
            .collect();

        let summary = cancellation_summary(
            artifact_id,
            dependents_unblocked.len(),
            parent_completion_affected
                .iter()
                .filter(|p| p.can_complete)
                .count(),
            children.len(),
        );
        let has_impact = !parent_completion_affected.is_empty()
            || !dependents_unblocked.is_empty()
            || !children.is_empty();

        Ok(CancellationImpactReport {
            artifact_id: artifact_id.clone(),
            parent_completion_affected,
            dependents_unblocked,
            children,
            has_impact,
            summary,
            analyzed_at: Utc::now(),
        })
    }

    /// At most one entry: empty only for root IDs. The parent record is
    /// attached when the store has one.
    async fn parent_completion(&self, id: &ArtifactId) -> Result<Vec<ParentCompletionImpact>> {
        let Some(parent_id) = id.parent() else {
            return Ok(Vec::new());
        };
        let parent = self.store.get(&parent_id).await?;
        if parent.is_none() {
            tracing::debug!(parent = %parent_id, "Parent has no record in store");
        }

        let remaining_incomplete = self
            .siblings(id)
            .await?
            .iter()
            .filter(|sibling| !sibling.is_terminal())
            .count();
        let can_complete = remaining_incomplete == 0;

        let message = if can_complete {
            format!("Parent {parent_id} can now be completed (all children done/cancelled)")
        } else {
            format!(
                "Parent {parent_id} still has {} incomplete {}",
                remaining_incomplete,
                if remaining_incomplete == 1 { "child" } else { "children" }
            )
        };

        Ok(vec![ParentCompletionImpact {
            id: parent_id,
            artifact: parent,
            remaining_incomplete,
            can_complete,
            message,
        }])
    }

    async fn dependents_unblocked(&self, id: &ArtifactId) -> Result<Vec<DependentUnblocked>> {
        let dependents = self.index.get_blocked_artifacts(id).await?;

        Ok(dependents
            .into_iter()
            .map(|dependent| {
                let remaining_blockers = remaining_dependencies(&dependent, id);
                let fully_unblocked = remaining_blockers == 0;
                let message = if fully_unblocked {
                    "Will be fully unblocked (no remaining blockers)".to_string()
                } else {
                    format!(
                        "Will have {} remaining",
                        count_noun(remaining_blockers, "blocker", "blockers")
                    )
                };

                DependentUnblocked {
                    id: dependent.id.clone(),
                    artifact: dependent,
                    remaining_blockers,
                    fully_unblocked,
                    message,
                }
            })
            .collect())
    }
}

fn cancellation_summary(
    id: &ArtifactId,
    dependents: usize,
    completable_parents: usize,
    children: usize,
) -> String {
    let mut clauses = Vec::new();

    if dependents > 0 {
        clauses.push(format!(
            "will unblock {}",
            count_noun(dependents, "dependent artifact", "dependent artifacts")
        ));
    }
    if completable_parents > 0 {
        clauses.push(format!(
            "will allow {} to be completed",
            count_noun(completable_parents, "parent", "parents")
        ));
    }
    if children > 0 {
        clauses.push(format!(
            "has {} (will remain in current state)",
            count_noun(children, "child", "children")
        ));
    }

    if clauses.is_empty() {
        format!("Cancelling {id} has no impact on other artifacts")
    } else {
        format!("Cancelling {id} {}", clauses.join(", "))
    }
}
