//! Error types for ripple operations.

use crate::domain::ArtifactId;
use std::io;
use thiserror::Error;

/// The error type for ripple operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The target artifact does not exist in the store.
    #[error("Artifact {0} not found")]
    ArtifactNotFound(ArtifactId),

    /// Malformed artifact identifier.
    #[error("Invalid artifact ID '{id}': {reason}")]
    InvalidArtifactId {
        /// The rejected input
        id: String,
        /// Why it was rejected
        reason: String,
    },

    /// Unknown operation name.
    #[error("Invalid operation '{0}': expected cancel, delete or remove_dependency")]
    InvalidOperation(String),

    /// Storage backend error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by artifact stores and dependency indexes.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or read.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The configured backend is not supported.
    #[error("Unsupported storage backend: {0}")]
    UnsupportedBackend(String),
}

/// Errors raised while locating or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.ripple/` directory was found.
    #[error("Not a ripple repository (no .ripple directory found in this or any parent directory)")]
    NotInitialized,

    /// The configuration file could not be parsed.
    #[error("Invalid configuration: {0}")]
    Parse(String),
}

/// A specialized Result type for ripple operations.
pub type Result<T> = std::result::Result<T, Error>;
