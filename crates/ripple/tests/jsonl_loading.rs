//! Integration tests for loading artifacts from JSONL and analyzing them.

mod common;

use common::{chain, write_jsonl};
use ripple::domain::ArtifactId;
use ripple::impact::{ImpactAnalyzer, Operation};
use ripple::storage::{LoadWarning, load_from_jsonl};
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn serialized_chain_analyzes_like_the_original() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("artifacts.jsonl");
    write_jsonl(&path, &chain());

    let (store, warnings) = load_from_jsonl(&path).await.unwrap();
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");

    let analyzer = ImpactAnalyzer::with_store(Arc::new(store));
    let report = analyzer
        .analyze_cancellation(&ArtifactId::new("A.1.2"))
        .await
        .unwrap();
    assert_eq!(report.summary, "Cancelling A.1.2 will unblock 1 dependent artifact");
}

#[tokio::test]
async fn corrupted_lines_are_skipped_and_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("artifacts.jsonl");
    std::fs::write(
        &path,
        concat!(
            "{\"id\":\"A\"}\n",
            "{\"id\":\"A.1\",\"relationships\":{\"blocked_by\":[\"GHOST\"]}}\n",
            "{\"id\":\"A\",\"title\":\"again\"}\n",
            "{broken\n",
            "\n",
            "{\"id\":\"bad id\"}\n",
        ),
    )
    .unwrap();

    let (store, warnings) = load_from_jsonl(&path).await.unwrap();
    assert_eq!(store.len().await, 2);

    assert!(warnings.contains(&LoadWarning::DuplicateArtifact {
        id: ArtifactId::new("A"),
        line_number: 3,
    }));
    assert!(warnings.contains(&LoadWarning::DanglingDependency {
        from: ArtifactId::new("A.1"),
        to: ArtifactId::new("GHOST"),
    }));
    let malformed: Vec<usize> = warnings
        .iter()
        .filter_map(|w| match w {
            LoadWarning::MalformedJson { line_number, .. } => Some(*line_number),
            _ => None,
        })
        .collect();
    assert_eq!(malformed, vec![4, 6]);

    // Dangling references are kept but never followed
    let analyzer = ImpactAnalyzer::with_store(Arc::new(store));
    let report = analyzer
        .analyze(&ArtifactId::new("A.1"), Operation::Cancel)
        .await
        .unwrap();
    assert!(!report.has_impact);
}
