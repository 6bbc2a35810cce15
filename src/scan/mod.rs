//! Directory scanning
//!
//! Walks the workspace, fingerprints every regular file and hands the result
//! over as [`DiskPath`]s (for ingestion) or a [`DiskIndex`] (for
//! reconciliation). Per-file problems are collected as [`ScanIssue`]s and
//! never abort the scan.

pub mod hasher;
pub mod path;
pub mod walker;

use crate::error::StorageError;
use crate::ingest::DiskPath;
use crate::progress::ScanProgress;
use crate::reconcile::DiskIndex;
use crate::types::Fingerprint;
use hasher::{Blake3Fingerprinter, ContentHasher};
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use walker::{Walker, WalkerConfig};

/// Kind of per-file scan problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Directory entry could not be read during the walk.
    Walk,
    /// File could not be opened or read while hashing.
    Read,
    /// The hasher produced something that is not a valid fingerprint.
    Format,
    /// The file name cannot be stored as a key (not valid UTF-8).
    Name,
}

/// A file the scan had to skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanIssue {
    pub path: PathBuf,
    pub kind: IssueKind,
    pub message: String,
}

impl fmt::Display for ScanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            IssueKind::Walk => "walk",
            IssueKind::Read => "read",
            IssueKind::Format => "format",
            IssueKind::Name => "name",
        };
        write!(f, "{} error at {}: {}", kind, self.path.display(), self.message)
    }
}

/// Result of scanning a workspace.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Successfully fingerprinted files, ordered by relative path.
    pub files: Vec<(String, Fingerprint)>,
    pub issues: Vec<ScanIssue>,
}

impl ScanOutcome {
    pub fn disk_index(&self) -> DiskIndex {
        self.files.iter().cloned().collect()
    }

    /// Files in the form the ingestion engine consumes.
    pub fn disk_paths(&self) -> Vec<DiskPath> {
        self.files.iter().cloned().map(DiskPath::from).collect()
    }

    /// Files that were found but could not be fingerprinted.
    pub fn error_count(&self) -> usize {
        self.issues.len()
    }

    /// Files seen by the walk, fingerprinted or not.
    pub fn total_seen(&self) -> usize {
        self.files.len()
            + self
                .issues
                .iter()
                .filter(|issue| issue.kind != IssueKind::Walk)
                .count()
    }
}

/// Scans a workspace root with a configurable hasher.
pub struct Scanner<H = Blake3Fingerprinter> {
    root: PathBuf,
    config: WalkerConfig,
    hasher: H,
}

impl Scanner<Blake3Fingerprinter> {
    /// Scanner over `root` using the default BLAKE3 fingerprinter.
    pub fn new(root: PathBuf, config: WalkerConfig) -> Self {
        Self {
            root,
            config,
            hasher: Blake3Fingerprinter,
        }
    }
}

impl<H: ContentHasher> Scanner<H> {
    pub fn with_hasher(root: PathBuf, config: WalkerConfig, hasher: H) -> Self {
        Self {
            root,
            config,
            hasher,
        }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Files the walk would fingerprint, as absolute paths.
    pub fn list_files(&self) -> (Vec<PathBuf>, Vec<ScanIssue>) {
        let outcome = Walker::with_config(self.root.clone(), self.config.clone()).walk();
        let issues = outcome
            .failures
            .into_iter()
            .map(|(path, message)| ScanIssue {
                path,
                kind: IssueKind::Walk,
                message,
            })
            .collect();
        (outcome.files, issues)
    }

    /// Walk and fingerprint every file under the root.
    #[instrument(skip(self, progress), fields(root = %self.root.display()))]
    pub fn scan(&self, progress: &ScanProgress) -> Result<ScanOutcome, StorageError> {
        let started = Instant::now();
        let (files, walk_issues) = self.list_files();
        debug!(files = files.len(), "Walked workspace");

        let mut outcome = ScanOutcome {
            files: Vec::with_capacity(files.len()),
            issues: walk_issues,
        };
        progress.set_length(files.len() as u64);

        for file in files {
            let key = match path::relative_key(&self.root, &file) {
                Ok(key) => key,
                Err(e) => {
                    warn!(path = %file.display(), "Skipping file with unusable name: {}", e);
                    outcome.issues.push(ScanIssue {
                        path: file,
                        kind: IssueKind::Name,
                        message: e.to_string(),
                    });
                    progress.inc();
                    continue;
                }
            };
            progress.set_current(&key);

            match self.hasher.hash_file(&file) {
                Ok(digest) => match Fingerprint::parse(&digest) {
                    Ok(fingerprint) => outcome.files.push((key, fingerprint)),
                    Err(e) => {
                        warn!(path = %key, digest = %digest, "Hasher produced an invalid fingerprint: {}", e);
                        outcome.issues.push(ScanIssue {
                            path: file,
                            kind: IssueKind::Format,
                            message: e.to_string(),
                        });
                    }
                },
                Err(e) => {
                    warn!(path = %key, "Failed to hash file: {}", e);
                    outcome.issues.push(ScanIssue {
                        path: file,
                        kind: IssueKind::Read,
                        message: e.to_string(),
                    });
                }
            }
            progress.inc();
        }
        progress.finish();

        info!(
            files = outcome.files.len(),
            issues = outcome.issues.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Scan complete"
        );
        Ok(outcome)
    }
}

/// Scan `root` with the default fingerprinter.
pub fn scan_workspace(
    root: &std::path::Path,
    config: &WalkerConfig,
    progress: &ScanProgress,
) -> Result<ScanOutcome, StorageError> {
    let root = path::canonical_root(root)?;
    Scanner::new(root, config.clone()).scan(progress)
}
