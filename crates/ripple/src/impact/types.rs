//! Report value objects returned by the impact analyzer.
//!
//! All reports are plain, serializable data built fresh for each call.
//! Field names serialize in camelCase (`artifactId`, `hasImpact`, ...).

use crate::domain::{Artifact, ArtifactId};
use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A prospective destructive operation on one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Mark the artifact cancelled
    Cancel,

    /// Remove the artifact entirely
    Delete,

    /// Drop one of the artifact's `blocked_by` entries
    RemoveDependency,
}

impl Operation {
    /// All operations, in declaration order.
    pub const ALL: [Operation; 3] = [
        Operation::Cancel,
        Operation::Delete,
        Operation::RemoveDependency,
    ];

    /// Wire name of the operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Cancel => "cancel",
            Operation::Delete => "delete",
            Operation::RemoveDependency => "remove_dependency",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "cancel" => Ok(Operation::Cancel),
            "delete" => Ok(Operation::Delete),
            "remove_dependency" => Ok(Operation::RemoveDependency),
            _ => Err(Error::InvalidOperation(s.to_string())),
        }
    }
}

/// Why a related artifact is affected by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactType {
    /// The operation keeps a parent from completing
    BlocksParentCompletion,

    /// The operation changes a dependency relationship
    BreaksDependency,

    /// The operation leaves children without a live parent
    OrphansChildren,
}

impl fmt::Display for ImpactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImpactType::BlocksParentCompletion => "blocks_parent_completion",
            ImpactType::BreaksDependency => "breaks_dependency",
            ImpactType::OrphansChildren => "orphans_children",
        };
        write!(f, "{s}")
    }
}

/// One artifact affected by an operation, with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactedArtifact {
    /// ID of the affected artifact
    pub id: ArtifactId,
    /// Full record of the affected artifact
    pub artifact: Artifact,
    /// Classification
    pub impact_type: ImpactType,
    /// Human-readable explanation
    pub reason: String,
}

/// Result of the coarse [`analyze`](super::ImpactAnalyzer::analyze) entry point.
///
/// No ID appears twice in `impacted_artifacts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    /// The artifact the operation targets
    pub artifact_id: ArtifactId,
    /// The analyzed operation
    pub operation: Operation,
    /// Affected artifacts, in classification order
    pub impacted_artifacts: Vec<ImpactedArtifact>,
    /// `true` when `impacted_artifacts` is non-empty
    pub has_impact: bool,
    /// When the analysis finished
    pub analyzed_at: DateTime<Utc>,
}

/// An artifact referenced by a report without further classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedArtifact {
    /// ID of the artifact
    pub id: ArtifactId,
    /// Full record
    pub artifact: Artifact,
}

impl From<Artifact> for RelatedArtifact {
    fn from(artifact: Artifact) -> Self {
        Self {
            id: artifact.id.clone(),
            artifact,
        }
    }
}

/// How cancelling an artifact changes its parent's ability to complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentCompletionImpact {
    /// Parent ID
    pub id: ArtifactId,
    /// Parent record, `None` when the store has no artifact with this ID
    pub artifact: Option<Artifact>,
    /// Siblings without a terminal event
    pub remaining_incomplete: usize,
    /// `true` when no incomplete siblings remain
    pub can_complete: bool,
    /// Human-readable explanation
    pub message: String,
}

/// A dependent whose blockers shrink when the target is cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentUnblocked {
    /// Dependent ID
    pub id: ArtifactId,
    /// Dependent record
    pub artifact: Artifact,
    /// Other `blocked_by` entries (structural count)
    pub remaining_blockers: usize,
    /// `true` when no other blockers remain
    pub fully_unblocked: bool,
    /// Human-readable explanation
    pub message: String,
}

/// Result of [`analyze_cancellation`](super::ImpactAnalyzer::analyze_cancellation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationImpactReport {
    /// The artifact being cancelled
    pub artifact_id: ArtifactId,
    /// Zero or one parent entry
    pub parent_completion_affected: Vec<ParentCompletionImpact>,
    /// Direct dependents
    pub dependents_unblocked: Vec<DependentUnblocked>,
    /// Direct children, untouched by cancellation
    pub children: Vec<RelatedArtifact>,
    /// `true` when any section is non-empty
    pub has_impact: bool,
    /// One-line description
    pub summary: String,
    /// When the analysis finished
    pub analyzed_at: DateTime<Utc>,
}

/// A dependent that loses a dependency when the target is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanedDependent {
    /// Dependent ID
    pub id: ArtifactId,
    /// Dependent record
    pub artifact: Artifact,
    /// `true` when no other dependencies remain
    pub fully_orphaned: bool,
    /// Other `blocked_by` entries (structural count)
    pub remaining_dependencies: usize,
    /// Human-readable explanation
    pub message: String,
}

/// The parent that loses a child when the target is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenParent {
    /// Parent ID
    pub id: ArtifactId,
    /// Parent record, `None` when the store has no artifact with this ID
    pub artifact: Option<Artifact>,
    /// Children left after the deletion
    pub remaining_children: usize,
    /// Human-readable explanation
    pub message: String,
}

/// A sibling of the deleted artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedSibling {
    /// Sibling ID
    pub id: ArtifactId,
    /// Sibling record
    pub artifact: Artifact,
    /// `true` when the sibling is already completed or cancelled
    pub can_help_complete: bool,
    /// Human-readable explanation
    pub message: String,
}

/// A child that loses its parent when the target is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanedChild {
    /// Child ID
    pub id: ArtifactId,
    /// Child record
    pub artifact: Artifact,
    /// Human-readable explanation
    pub message: String,
}

/// Result of [`analyze_deletion`](super::ImpactAnalyzer::analyze_deletion).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionImpactReport {
    /// The artifact being deleted
    pub artifact_id: ArtifactId,
    /// Direct dependents
    pub orphaned_dependents: Vec<OrphanedDependent>,
    /// Parent entry, absent for root artifacts
    pub broken_parent: Option<BrokenParent>,
    /// Other children of the same parent
    pub affected_siblings: Vec<AffectedSibling>,
    /// Direct children of the deleted artifact
    pub orphaned_children: Vec<OrphanedChild>,
    /// `true` when any section is non-empty
    pub has_impact: bool,
    /// `true` when dependents would be orphaned
    pub requires_force: bool,
    /// One-line description
    pub summary: String,
    /// When the analysis finished
    pub analyzed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cancel", Operation::Cancel)]
    #[case("delete", Operation::Delete)]
    #[case("remove_dependency", Operation::RemoveDependency)]
    #[case("remove-dependency", Operation::RemoveDependency)]
    #[case(" DELETE ", Operation::Delete)]
    fn parse_operation(#[case] input: &str, #[case] expected: Operation) {
        assert_eq!(input.parse::<Operation>().unwrap(), expected);
    }

    #[test]
    fn parse_unknown_operation() {
        assert!(matches!(
            "archive".parse::<Operation>(),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn operation_display_matches_serde() {
        for op in Operation::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{op}\""));
        }
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = ImpactReport {
            artifact_id: ArtifactId::new("A.1"),
            operation: Operation::RemoveDependency,
            impacted_artifacts: vec![ImpactedArtifact {
                id: ArtifactId::new("A.2"),
                artifact: Artifact::new("A.2"),
                impact_type: ImpactType::BreaksDependency,
                reason: "Shares dependency A.0 with A.1".to_string(),
            }],
            has_impact: true,
            analyzed_at: Utc::now(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["artifactId"], "A.1");
        assert_eq!(value["operation"], "remove_dependency");
        assert_eq!(value["hasImpact"], true);
        assert_eq!(value["impactedArtifacts"][0]["impactType"], "breaks_dependency");
        assert!(value["analyzedAt"].is_string());
    }
}
