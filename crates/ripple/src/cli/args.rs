//! CLI argument structs for all commands.

use clap::Parser;

use super::validators::{parse_operation, validate_artifact_id};
use crate::domain::ArtifactId;
use crate::impact::Operation;

/// Arguments for the `analyze` command
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Artifact ID to analyze (e.g., A.1.2)
    #[arg(value_parser = validate_artifact_id)]
    pub id: ArtifactId,

    /// Operation to analyze: cancel, delete, or remove-dependency
    #[arg(short, long, value_parser = parse_operation, default_value = "delete")]
    pub operation: Operation,
}

/// Arguments for the `cancel` command
#[derive(Parser, Debug, Clone)]
pub struct CancelArgs {
    /// Artifact ID to analyze for cancellation
    #[arg(value_parser = validate_artifact_id)]
    pub id: ArtifactId,
}

/// Arguments for the `delete` command
#[derive(Parser, Debug, Clone)]
pub struct DeleteArgs {
    /// Artifact ID to analyze for deletion
    #[arg(value_parser = validate_artifact_id)]
    pub id: ArtifactId,
}

/// Arguments for the `children` command
#[derive(Parser, Debug, Clone)]
pub struct ChildrenArgs {
    /// Parent artifact ID
    #[arg(value_parser = validate_artifact_id)]
    pub id: ArtifactId,
}
