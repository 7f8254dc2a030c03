//! JSONL loading for the in-memory store.
//!
//! Each non-blank line of the file is one serialized [`Artifact`]. Loading is
//! resilient: bad lines are skipped and reported as [`LoadWarning`]s instead
//! of failing the whole load.

use super::InMemoryArtifactStore;
use crate::domain::{Artifact, ArtifactId};
use crate::error::Result;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::RwLock;

/// Warnings that can occur during JSONL file loading.
///
/// These are non-fatal: the load continues and problematic data is skipped
/// or kept as-is. Applications should report them to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// Line that couldn't be parsed as an artifact
    ///
    /// **Effect**: Line is skipped entirely.
    MalformedJson {
        /// 1-based line number in the file
        line_number: usize,
        /// Parser message
        error: String,
    },

    /// A second artifact with an ID already seen in the file
    ///
    /// **Effect**: The later line is skipped; the first occurrence wins.
    DuplicateArtifact {
        /// The repeated ID
        id: ArtifactId,
        /// 1-based line number of the skipped occurrence
        line_number: usize,
    },

    /// `blocked_by` references an artifact that isn't in the file
    ///
    /// **Effect**: None. The reference is kept on the artifact; dependency
    /// lookups treat it as absent.
    DanglingDependency {
        /// The artifact holding the reference
        from: ArtifactId,
        /// The missing target
        to: ArtifactId,
    },
}

/// Load a store from a JSONL file.
///
/// Returns the store together with all non-fatal warnings encountered.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be opened or read.
pub async fn load_from_jsonl(path: &Path) -> Result<(InMemoryArtifactStore, Vec<LoadWarning>)> {
    let file = File::open(path).await?;
    let mut reader = BufReader::new(file);

    let mut warnings = Vec::new();
    let mut artifacts: BTreeMap<ArtifactId, Artifact> = BTreeMap::new();
    let mut line_number = 0;
    let mut buf = Vec::new();

    // First pass: parse lines, first occurrence of an ID wins.
    // Lines are read as bytes so invalid UTF-8 only costs that line.
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        line_number += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                warnings.push(LoadWarning::MalformedJson {
                    line_number,
                    error: format!("invalid UTF-8: {e}"),
                });
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Artifact>(line) {
            Ok(artifact) => {
                if artifacts.contains_key(&artifact.id) {
                    warnings.push(LoadWarning::DuplicateArtifact {
                        id: artifact.id,
                        line_number,
                    });
                } else {
                    artifacts.insert(artifact.id.clone(), artifact);
                }
            }
            Err(e) => warnings.push(LoadWarning::MalformedJson {
                line_number,
                error: e.to_string(),
            }),
        }
    }

    // Second pass: report references to missing artifacts
    let known: HashSet<&ArtifactId> = artifacts.keys().collect();
    for artifact in artifacts.values() {
        for dep in artifact.dependencies() {
            if !known.contains(dep) {
                warnings.push(LoadWarning::DanglingDependency {
                    from: artifact.id.clone(),
                    to: dep.clone(),
                });
            }
        }
    }

    tracing::debug!(
        path = %path.display(),
        artifacts = artifacts.len(),
        warnings = warnings.len(),
        "Loaded artifacts from JSONL"
    );

    let store = InMemoryArtifactStore {
        artifacts: Arc::new(RwLock::new(artifacts)),
    };
    Ok((store, warnings))
}
