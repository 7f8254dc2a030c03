//! Domain types for artifact tracking.
//!
//! This module contains the core domain types consumed by the impact
//! analyzer: artifacts, their dependency relationships, and the event log
//! from which lifecycle state is inferred.

mod id;

pub use id::{ArtifactId, SEGMENT_SEPARATOR};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A unit of trackable work identified by a dotted hierarchical ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Unique hierarchical identifier (e.g. `A.1.2`)
    pub id: ArtifactId,

    /// Human-readable title (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Dependency relationships
    #[serde(default)]
    pub relationships: Relationships,

    /// Ordered lifecycle events
    #[serde(default)]
    pub events: Vec<ArtifactEvent>,
}

impl Artifact {
    /// Create an artifact with no relationships and no events.
    pub fn new(id: impl Into<ArtifactId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            relationships: Relationships::default(),
            events: Vec::new(),
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a `blocked_by` dependency.
    #[must_use]
    pub fn blocked_by(mut self, id: impl Into<ArtifactId>) -> Self {
        self.relationships.blocked_by.push(id.into());
        self
    }

    /// Add a `blocks` relationship.
    #[must_use]
    pub fn blocks(mut self, id: impl Into<ArtifactId>) -> Self {
        self.relationships.blocks.push(id.into());
        self
    }

    /// Append an event stamped with the current time.
    #[must_use]
    pub fn with_event(mut self, event: EventKind) -> Self {
        self.events.push(ArtifactEvent {
            event,
            timestamp: Utc::now(),
            actor: "system".to_string(),
            trigger: default_trigger(event).to_string(),
        });
        self
    }

    /// IDs this artifact depends on, in declaration order.
    pub fn dependencies(&self) -> &[ArtifactId] {
        &self.relationships.blocked_by
    }

    /// Returns true if the event history contains a `completed` or
    /// `cancelled` entry.
    ///
    /// This is the single terminal-state predicate shared by every analysis.
    pub fn is_terminal(&self) -> bool {
        self.events.iter().any(|e| e.event.is_terminal())
    }

    /// The most recent event kind, if any.
    pub fn current_state(&self) -> Option<EventKind> {
        self.events.last().map(|e| e.event)
    }
}

/// Relationships between artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationships {
    /// Artifacts that must reach a terminal state before this one is unblocked
    #[serde(default)]
    pub blocked_by: Vec<ArtifactId>,

    /// Artifacts this one blocks (informational mirror of `blocked_by`)
    #[serde(default)]
    pub blocks: Vec<ArtifactId>,
}

/// A single entry in an artifact's event history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEvent {
    /// What happened
    pub event: EventKind,

    /// When it happened (UTC)
    pub timestamp: DateTime<Utc>,

    /// Who did it
    pub actor: String,

    /// What caused it (e.g. `artifact_created`, `dependencies_met`)
    pub trigger: String,
}

/// Lifecycle event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Artifact drafted
    Draft,

    /// Ready to be worked on
    Ready,

    /// Waiting on dependencies
    Blocked,

    /// Work has started
    InProgress,

    /// Under review
    InReview,

    /// Work finished
    Completed,

    /// Abandoned
    Cancelled,

    /// Archived after completion or cancellation
    Archived,
}

impl EventKind {
    /// Returns true for `completed` and `cancelled`.
    pub fn is_terminal(self) -> bool {
        matches!(self, EventKind::Completed | EventKind::Cancelled)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventKind::Draft => "draft",
            EventKind::Ready => "ready",
            EventKind::Blocked => "blocked",
            EventKind::InProgress => "in_progress",
            EventKind::InReview => "in_review",
            EventKind::Completed => "completed",
            EventKind::Cancelled => "cancelled",
            EventKind::Archived => "archived",
        };
        write!(f, "{s}")
    }
}

fn default_trigger(event: EventKind) -> &'static str {
    match event {
        EventKind::Draft => "artifact_created",
        EventKind::Ready | EventKind::Blocked => "dependencies_met",
        EventKind::InProgress => "branch_created",
        EventKind::InReview => "pr_ready",
        EventKind::Completed => "pr_merged",
        EventKind::Cancelled => "manual_cancel",
        EventKind::Archived => "manual_archive",
    }
}

/// Filter for listing artifacts.
#[derive(Debug, Clone, Default)]
pub struct ArtifactFilter {
    /// Only artifacts whose ID starts with this prefix
    pub id_prefix: Option<String>,

    /// Limit number of results
    pub limit: Option<usize>,
}

impl ArtifactFilter {
    /// Returns true if the artifact passes the prefix filter.
    ///
    /// `limit` is applied by the store, not here.
    pub fn matches(&self, artifact: &Artifact) -> bool {
        self.id_prefix
            .as_deref()
            .is_none_or(|prefix| artifact.id.as_str().starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EventKind::Completed, true)]
    #[case(EventKind::Cancelled, true)]
    #[case(EventKind::InProgress, false)]
    #[case(EventKind::Archived, false)]
    #[case(EventKind::Ready, false)]
    fn terminal_events(#[case] kind: EventKind, #[case] expected: bool) {
        assert_eq!(kind.is_terminal(), expected);
    }

    #[test]
    fn terminal_anywhere_in_history() {
        let artifact = Artifact::new("A.1")
            .with_event(EventKind::Draft)
            .with_event(EventKind::Completed)
            .with_event(EventKind::Archived);

        assert!(artifact.is_terminal());
        assert_eq!(artifact.current_state(), Some(EventKind::Archived));
    }

    #[test]
    fn no_events_is_not_terminal() {
        let artifact = Artifact::new("A.1");
        assert!(!artifact.is_terminal());
        assert_eq!(artifact.current_state(), None);
    }

    #[test]
    fn deserialize_minimal_artifact() {
        let artifact: Artifact = serde_json::from_str(r#"{"id":"A.1.2"}"#).unwrap();

        assert_eq!(artifact.id, ArtifactId::new("A.1.2"));
        assert!(artifact.dependencies().is_empty());
        assert!(artifact.events.is_empty());
    }

    #[test]
    fn deserialize_full_artifact() {
        let json = r#"{
            "id": "A.1.3",
            "title": "Wire up the parser",
            "relationships": {"blocked_by": ["A.1.2"], "blocks": []},
            "events": [
                {"event": "draft", "timestamp": "2025-01-01T00:00:00Z", "actor": "dev", "trigger": "artifact_created"},
                {"event": "in_progress", "timestamp": "2025-01-02T00:00:00Z", "actor": "dev", "trigger": "branch_created"}
            ]
        }"#;
        let artifact: Artifact = serde_json::from_str(json).unwrap();

        assert_eq!(artifact.dependencies(), &[ArtifactId::new("A.1.2")]);
        assert_eq!(artifact.current_state(), Some(EventKind::InProgress));
        assert!(!artifact.is_terminal());
    }

    #[test]
    fn filter_by_prefix() {
        let filter = ArtifactFilter {
            id_prefix: Some("A.1".to_string()),
            limit: None,
        };

        assert!(filter.matches(&Artifact::new("A.1.2")));
        assert!(!filter.matches(&Artifact::new("B.1")));
        assert!(ArtifactFilter::default().matches(&Artifact::new("B.1")));
    }
}
