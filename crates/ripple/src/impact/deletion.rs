//! Precise deletion analysis.

use super::{
    AffectedSibling, BrokenParent, DeletionImpactReport, ImpactAnalyzer, OrphanedChild,
    OrphanedDependent, count_noun, remaining_dependencies,
};
use crate::domain::{Artifact, ArtifactId};
use crate::error::Result;
use chrono::Utc;

impl ImpactAnalyzer {
    /// Analyze what deleting `artifact_id` leaves behind: orphaned dependents
    /// and children, the parent losing a child, and that parent's other
    /// children.
    ///
    /// `requires_force` is set when any dependent would be orphaned.
    ///
    /// # Errors
    ///
    /// Returns `Error::ArtifactNotFound` if the artifact doesn't exist.
    pub async fn analyze_deletion(&self, artifact_id: &ArtifactId) -> Result<DeletionImpactReport> {
        self.require(artifact_id).await?;
        tracing::debug!(artifact = %artifact_id, "Analyzing deletion");

        let orphaned_dependents = self.orphaned_dependents(artifact_id).await?;
        let siblings = self.siblings(artifact_id).await?;
        let broken_parent = self.broken_parent(artifact_id, siblings.len()).await?;
        let affected_siblings: Vec<AffectedSibling> =
            siblings.into_iter().map(affected_sibling).collect();
        let orphaned_children: Vec<OrphanedChild> = self
            .find_children_in_hierarchy(artifact_id)
            .await?
            .into_iter()
            .map(|child| OrphanedChild {
                id: child.id.clone(),
                artifact: child,
                message: format!("Will lose parent {artifact_id}"),
            })
            .collect();

        let summary = deletion_summary(
            artifact_id,
            orphaned_dependents.len(),
            broken_parent.as_ref().map(|p| &p.id),
            orphaned_children.len(),
        );
        let has_impact = !orphaned_dependents.is_empty()
            || broken_parent.is_some()
            || !affected_siblings.is_empty()
            || !orphaned_children.is_empty();
        let requires_force = !orphaned_dependents.is_empty();

        Ok(DeletionImpactReport {
            artifact_id: artifact_id.clone(),
            orphaned_dependents,
            broken_parent,
            affected_siblings,
            orphaned_children,
            has_impact,
            requires_force,
            summary,
            analyzed_at: Utc::now(),
        })
    }

    async fn orphaned_dependents(&self, id: &ArtifactId) -> Result<Vec<OrphanedDependent>> {
        let dependents = self.index.get_blocked_artifacts(id).await?;

        Ok(dependents
            .into_iter()
            .map(|dependent| {
                let remaining = remaining_dependencies(&dependent, id);
                let fully_orphaned = remaining == 0;
                let message = if fully_orphaned {
                    "Will have no remaining dependencies (fully orphaned)".to_string()
                } else {
                    format!(
                        "Will have {} remaining",
                        count_noun(remaining, "dependency", "dependencies")
                    )
                };

                OrphanedDependent {
                    id: dependent.id.clone(),
                    artifact: dependent,
                    fully_orphaned,
                    remaining_dependencies: remaining,
                    message,
                }
            })
            .collect())
    }

    /// The parent entry, present whenever `id` has a parent ID. The parent
    /// record is attached when the store has one.
    async fn broken_parent(
        &self,
        id: &ArtifactId,
        remaining_children: usize,
    ) -> Result<Option<BrokenParent>> {
        let Some(parent_id) = id.parent() else {
            return Ok(None);
        };
        let parent = self.store.get(&parent_id).await?;
        if parent.is_none() {
            tracing::debug!(parent = %parent_id, "Parent has no record in store");
        }

        let message = if remaining_children == 0 {
            format!("Parent {parent_id} will have no remaining children")
        } else {
            format!(
                "Parent {parent_id} will have {} remaining",
                count_noun(remaining_children, "child", "children")
            )
        };

        Ok(Some(BrokenParent {
            id: parent_id,
            artifact: parent,
            remaining_children,
            message,
        }))
    }
}

fn affected_sibling(sibling: Artifact) -> AffectedSibling {
    let can_help_complete = sibling.is_terminal();
    let message = if can_help_complete {
        "Sibling is complete and can help complete parent".to_string()
    } else {
        "Sibling is incomplete; parent completion still blocked".to_string()
    };

    AffectedSibling {
        id: sibling.id.clone(),
        artifact: sibling,
        can_help_complete,
        message,
    }
}

fn deletion_summary(
    id: &ArtifactId,
    orphaned_dependents: usize,
    broken_parent: Option<&ArtifactId>,
    orphaned_children: usize,
) -> String {
    let mut clauses = Vec::new();

    // Siblings and the parent record itself are not part of the total
    let total = orphaned_dependents + orphaned_children;
    if total > 0 {
        clauses.push(format!(
            "will affect {}",
            count_noun(total, "artifact", "artifacts")
        ));
    }
    if let Some(parent_id) = broken_parent {
        clauses.push(format!("will break parent {parent_id}"));
    }
    if orphaned_children > 0 {
        clauses.push(format!(
            "will orphan {}",
            count_noun(orphaned_children, "child", "children")
        ));
    }

    if clauses.is_empty() {
        format!("Deleting {id} has no impact on other artifacts")
    } else {
        format!("Deleting {id} {}", clauses.join(", "))
    }
}
