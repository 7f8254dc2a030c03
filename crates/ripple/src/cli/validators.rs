//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use crate::domain::ArtifactId;
use crate::impact::Operation;

/// Validate an artifact ID.
///
/// Expected format: dot-separated segments of alphanumerics, `-` or `_`
/// (e.g., `A`, `A.1`, `epic-7.2.3`).
pub fn validate_artifact_id(s: &str) -> Result<ArtifactId, String> {
    s.parse().map_err(|e: crate::error::Error| e.to_string())
}

/// Parse an operation name, accepting `remove-dependency` as well as
/// `remove_dependency`.
pub fn parse_operation(s: &str) -> Result<Operation, String> {
    s.parse().map_err(|e: crate::error::Error| {
        let names: Vec<&str> = Operation::ALL.iter().map(|op| op.as_str()).collect();
        format!("{e} (expected one of: {})", names.join(", "))
    })
}
