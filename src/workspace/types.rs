//! Workflow result types.

use crate::ingest::{IngestMode, IngestReport};
use crate::reconcile::Classification;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of an add or regenerate run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestSummary {
    pub mode: IngestMode,
    pub database: PathBuf,
    pub report: IngestReport,
    /// Fingerprints stored after the run.
    pub fingerprints_in_db: usize,
    /// Non-fatal problems: load repairs and files that could not be hashed.
    pub warnings: Vec<String>,
    pub duration_ms: u64,
}

/// Outcome of a verify run.
#[derive(Debug, Clone, Serialize)]
pub struct VerifySummary {
    pub database: PathBuf,
    pub files_on_disk: usize,
    pub fingerprints_in_db: usize,
    pub paths_in_db: usize,
    pub classification: Classification,
    pub warnings: Vec<String>,
    pub duration_ms: u64,
}

impl VerifySummary {
    pub fn database_is_empty(&self) -> bool {
        self.fingerprints_in_db == 0
    }
}
