//! Ripple - impact analysis for hierarchical work artifacts.
//!
//! Before an artifact is cancelled, deleted, or has a dependency removed,
//! [`impact::ImpactAnalyzer`] reports which other artifacts are affected:
//! dependents, dependencies, parent, siblings, and children. The analysis
//! is read-only and advisory.
//!
//! ```no_run
//! use ripple::domain::{Artifact, ArtifactId};
//! use ripple::impact::{ImpactAnalyzer, Operation};
//! use ripple::storage::InMemoryArtifactStore;
//! use std::sync::Arc;
//!
//! # async fn demo() -> ripple::error::Result<()> {
//! let store = InMemoryArtifactStore::from_artifacts([
//!     Artifact::new("A.1"),
//!     Artifact::new("A.2").blocked_by("A.1"),
//! ]);
//! let analyzer = ImpactAnalyzer::with_store(Arc::new(store));
//!
//! let report = analyzer.analyze(&ArtifactId::new("A.1"), Operation::Delete).await?;
//! assert!(report.has_impact);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod domain;
pub mod error;
pub mod impact;
pub mod storage;

pub mod app;
pub mod config;

// Public CLI module (needed by binary)
pub mod cli;
pub mod output;
