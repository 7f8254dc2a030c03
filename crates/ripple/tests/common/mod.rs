//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use ripple::domain::{Artifact, EventKind};
use ripple::impact::ImpactAnalyzer;
use ripple::storage::InMemoryArtifactStore;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::Arc;

/// Build an analyzer over a fresh in-memory store.
pub fn analyzer(artifacts: impl IntoIterator<Item = Artifact>) -> ImpactAnalyzer {
    ImpactAnalyzer::with_store(Arc::new(InMemoryArtifactStore::from_artifacts(artifacts)))
}

/// A.1.1 (completed) <- A.1.2 <- A.1.3, all under milestone A.1 in epic A.
pub fn chain() -> Vec<Artifact> {
    vec![
        Artifact::new("A"),
        Artifact::new("A.1"),
        Artifact::new("A.1.1")
            .with_event(EventKind::Completed)
            .blocks("A.1.2"),
        Artifact::new("A.1.2").blocked_by("A.1.1").blocks("A.1.3"),
        Artifact::new("A.1.3").blocked_by("A.1.2"),
    ]
}

/// Serialize artifacts as JSONL and write them to `path`.
pub fn write_jsonl(path: &Path, artifacts: &[Artifact]) {
    let content: String = artifacts
        .iter()
        .map(|a| serde_json::to_string(a).unwrap() + "\n")
        .collect();
    std::fs::write(path, content).unwrap();
}

/// Run the ripple binary in `dir` with colors disabled.
pub fn run_ripple_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ripple"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute ripple binary")
}
