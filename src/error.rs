//! Error types for the fixity integrity database.

use crate::types::{Fingerprint, FingerprintError};
use std::path::PathBuf;
use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Snapshot database is corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to encode snapshot database: {0}")]
    Encode(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors surfaced by workflows and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Checksum database not found at {0}. Run `fixity regenerate` to create it.")]
    DatabaseMissing(PathBuf),

    #[error("No files found to process under {0}")]
    NothingToScan(PathBuf),

    #[error("Invalid fingerprint: {0}")]
    InvalidFingerprint(#[from] FingerprintError),

    #[error("Interactive input failed: {0}")]
    Interaction(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// A broken store invariant. Indicates a defect in the ingestion logic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("Path {path} is bound to both {first} and {second}")]
    PathBoundTwice {
        path: String,
        first: Fingerprint,
        second: Fingerprint,
    },

    #[error("Entry {0} has no paths")]
    EmptyEntry(Fingerprint),

    #[error("Entry keyed {key} records fingerprint {recorded}")]
    KeyMismatch {
        key: Fingerprint,
        recorded: Fingerprint,
    },

    #[error("Reverse index disagrees with entries for path {0}")]
    StaleIndex(String),
}
