//! Dotted hierarchical artifact identifiers.
//!
//! ID format: one or more non-empty segments separated by `.`. The first
//! segment names a top-level artifact (e.g. `A`), every further segment is a
//! sequence number (e.g. `A.1`, `A.1.2`).
//!
//! The hierarchy is implicit in the identifier: there is no tree structure,
//! only segment-list parsing plus a prefix-and-depth test.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Segment separator for hierarchical IDs.
pub const SEGMENT_SEPARATOR: char = '.';

/// Unique, dotted identifier for an artifact (e.g. `A.1.2`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Create an artifact ID without validation.
    ///
    /// Use [`str::parse`] when the input comes from users or files.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the dot-delimited segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEGMENT_SEPARATOR)
    }

    /// Number of segments (`A` is 1, `A.1.2` is 3).
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Returns true for single-segment IDs, which have no parent.
    pub fn is_root(&self) -> bool {
        !self.0.contains(SEGMENT_SEPARATOR)
    }

    /// The parent ID (this ID with its final segment removed).
    ///
    /// Returns `None` for root IDs.
    pub fn parent(&self) -> Option<ArtifactId> {
        self.0
            .rsplit_once(SEGMENT_SEPARATOR)
            .map(|(parent, _)| ArtifactId(parent.to_string()))
    }

    /// Returns true if `self` is a direct child of `parent`.
    ///
    /// A direct child starts with `{parent}.` and the remainder is exactly one
    /// numeric segment; deeper descendants do not match.
    pub fn is_direct_child_of(&self, parent: &ArtifactId) -> bool {
        self.0
            .strip_prefix(parent.as_str())
            .and_then(|rest| rest.strip_prefix(SEGMENT_SEPARATOR))
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ArtifactId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        validate(s).map_err(|reason| Error::InvalidArtifactId {
            id: s.to_string(),
            reason,
        })?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ArtifactId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ArtifactId> for String {
    fn from(id: ArtifactId) -> Self {
        id.0
    }
}

impl From<&str> for ArtifactId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Natural ordering: segments compare numerically when both are numbers,
/// so `A.2` sorts before `A.10`. Numerically equal segments with different
/// spellings (`1`, `01`) fall back to string order, keeping `Ord` consistent
/// with `Eq`.
impl Ord for ArtifactId {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut left = self.segments();
        let mut right = other.segments();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(a), Some(b)) => {
                    let ordering = match (a.parse::<u64>(), b.parse::<u64>()) {
                        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
                        _ => a.cmp(b),
                    };
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
            }
        }
    }
}

impl PartialOrd for ArtifactId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn validate(s: &str) -> Result<(), String> {
    if s.is_empty() {
        return Err("ID cannot be empty".to_string());
    }

    if s.split(SEGMENT_SEPARATOR).any(str::is_empty) {
        return Err("ID segments cannot be empty".to_string());
    }

    if !s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == SEGMENT_SEPARATOR || c == '-' || c == '_')
    {
        return Err(
            "ID may only contain alphanumerics, '-', '_' and '.' separators".to_string(),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("A", None)]
    #[case("A.1", Some("A"))]
    #[case("A.1.2", Some("A.1"))]
    #[case("B.10.3", Some("B.10"))]
    fn parent_drops_last_segment(#[case] id: &str, #[case] expected: Option<&str>) {
        let id = ArtifactId::new(id);
        assert_eq!(id.parent(), expected.map(ArtifactId::new));
    }

    #[rstest]
    #[case("A.1", "A", true)]
    #[case("A.1.2", "A.1", true)]
    #[case("A.1.2", "A", false)]
    #[case("A.12", "A.1", false)]
    #[case("A", "A", false)]
    #[case("AB.1", "A", false)]
    #[case("A.x", "A", false)]
    fn direct_child_detection(#[case] child: &str, #[case] parent: &str, #[case] expected: bool) {
        assert_eq!(
            ArtifactId::new(child).is_direct_child_of(&ArtifactId::new(parent)),
            expected
        );
    }

    #[test]
    fn depth_and_root() {
        let root = ArtifactId::new("A");
        let leaf = ArtifactId::new("A.1.2");

        assert!(root.is_root());
        assert_eq!(root.depth(), 1);
        assert!(!leaf.is_root());
        assert_eq!(leaf.depth(), 3);
        assert_eq!(leaf.segments().collect::<Vec<_>>(), vec!["A", "1", "2"]);
    }

    #[test]
    fn natural_ordering() {
        let mut ids: Vec<ArtifactId> = ["A.10", "A.2", "A", "B", "A.2.1", "A.1"]
            .into_iter()
            .map(ArtifactId::new)
            .collect();
        ids.sort();

        let sorted: Vec<&str> = ids.iter().map(ArtifactId::as_str).collect();
        assert_eq!(sorted, vec!["A", "A.1", "A.2", "A.2.1", "A.10", "B"]);
    }

    #[rstest]
    #[case("A.1", "A.01")]
    #[case("A.007", "A.7")]
    #[case("B.0.2", "B.00.2")]
    fn zero_padded_segments_stay_distinct(#[case] a: &str, #[case] b: &str) {
        let (a, b) = (ArtifactId::new(a), ArtifactId::new(b));

        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    #[test]
    fn zero_padded_segments_sort_next_to_their_value() {
        let mut ids: Vec<ArtifactId> = ["A.2", "A.01", "A.1", "A.10"]
            .into_iter()
            .map(ArtifactId::new)
            .collect();
        ids.sort();

        let sorted: Vec<&str> = ids.iter().map(ArtifactId::as_str).collect();
        assert_eq!(sorted, vec!["A.01", "A.1", "A.2", "A.10"]);
    }

    #[rstest]
    #[case("")]
    #[case("A..1")]
    #[case(".A")]
    #[case("A.")]
    #[case("A 1")]
    fn parse_rejects_malformed_ids(#[case] input: &str) {
        let result = input.parse::<ArtifactId>();
        assert!(matches!(result, Err(Error::InvalidArtifactId { .. })));
    }

    #[test]
    fn parse_trims_whitespace() {
        let id: ArtifactId = "  A.1.2 ".parse().unwrap();
        assert_eq!(id.as_str(), "A.1.2");
    }

    #[test]
    fn serde_validates_ids() {
        let ok: ArtifactId = serde_json::from_str("\"A.1\"").unwrap();
        assert_eq!(ok, ArtifactId::new("A.1"));

        let err = serde_json::from_str::<ArtifactId>("\"A..1\"");
        assert!(err.is_err());
    }
}
