//! Ingestion Engine
//!
//! Folds a fresh directory scan into the Snapshot Store. `AppendOnly` only
//! records paths the store has never seen; `Regenerate` rebinds every path to
//! its current content. Both modes finish by pruning records whose files no
//! longer exist.

use crate::scan::path::resolve_key;
use crate::store::{Binding, SnapshotStore};
use crate::types::{Fingerprint, Timestamp};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, trace, warn};

/// How existing path-to-content bindings are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngestMode {
    /// Never overwrite an existing binding; only add unknown paths.
    AppendOnly,
    /// Rebind every scanned path to its current fingerprint.
    Regenerate,
}

/// One scanned file as handed over by the hashing collaborator. The
/// fingerprint is still unvalidated at this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskPath {
    pub path: String,
    pub fingerprint: String,
}

impl DiskPath {
    pub fn new(path: impl Into<String>, fingerprint: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            fingerprint: fingerprint.into(),
        }
    }
}

impl From<(String, Fingerprint)> for DiskPath {
    fn from((path, fingerprint): (String, Fingerprint)) -> Self {
        Self {
            path,
            fingerprint: fingerprint.into(),
        }
    }
}

/// Counters for one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Disk paths handed to the engine.
    pub scanned: usize,
    /// Disk paths that produced a store write.
    pub processed: usize,
    /// Paths the store had never seen.
    pub added: usize,
    /// Known paths refreshed or rebound to new content.
    pub updated: usize,
    /// Append-only runs: known paths whose content changed and were left alone.
    pub skipped: usize,
    /// Records dropped because their file no longer exists.
    pub pruned: usize,
    /// Rejected fingerprints (plus hashing failures, when merged by the caller).
    pub errors: usize,
}

/// Existence check used by the prune step.
pub trait ExistenceCheck {
    fn exists(&self, relative_path: &str) -> bool;
}

impl<F> ExistenceCheck for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, relative_path: &str) -> bool {
        self(relative_path)
    }
}

/// Existence check against a workspace directory on the real filesystem.
#[derive(Debug, Clone)]
pub struct RootedExistence {
    root: PathBuf,
}

impl RootedExistence {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ExistenceCheck for RootedExistence {
    fn exists(&self, relative_path: &str) -> bool {
        std::fs::metadata(resolve_key(&self.root, relative_path)).is_ok()
    }
}

/// Apply the scanned paths to the store (steps 1-3 and 5), without pruning.
pub fn apply_scan<I>(
    store: &mut SnapshotStore,
    disk_paths: I,
    mode: IngestMode,
    now: Timestamp,
) -> IngestReport
where
    I: IntoIterator<Item = DiskPath>,
{
    let mut report = IngestReport::default();

    for disk_path in disk_paths {
        report.scanned += 1;

        let fingerprint = match Fingerprint::parse(&disk_path.fingerprint) {
            Ok(fp) => fp,
            Err(e) => {
                warn!(
                    path = %disk_path.path,
                    fingerprint = %disk_path.fingerprint,
                    "Rejected fingerprint: {}",
                    e
                );
                report.errors += 1;
                continue;
            }
        };

        let current = store.locate(&disk_path.path).cloned();
        match (mode, current) {
            (IngestMode::AppendOnly, Some(existing)) if existing != fingerprint => {
                trace!(path = %disk_path.path, "Content changed; append-only run leaves it");
                report.skipped += 1;
                continue;
            }
            _ => {}
        }

        match store.bind(&disk_path.path, &fingerprint, now) {
            Binding::Added => report.added += 1,
            Binding::Refreshed => report.updated += 1,
            Binding::Rebound { from } => {
                debug!(path = %disk_path.path, from = %from, to = %fingerprint, "Rebound path");
                report.updated += 1;
            }
        }
        report.processed += 1;
    }

    report
}

/// Prune records whose files no longer exist (step 4). Returns the number of
/// records removed.
pub fn prune_missing<C>(store: &mut SnapshotStore, check: &C) -> usize
where
    C: ExistenceCheck + ?Sized,
{
    let removed = store.retain_paths(|path| check.exists(path));
    for (fingerprint, path) in &removed {
        trace!(path = %path, fingerprint = %fingerprint, "Pruned missing path");
    }
    removed.len()
}

/// Full ingestion run: apply the scan, then prune against `check`.
#[instrument(skip_all, fields(mode = ?mode))]
pub fn ingest<I, C>(
    store: &mut SnapshotStore,
    disk_paths: I,
    mode: IngestMode,
    check: &C,
    now: Timestamp,
) -> IngestReport
where
    I: IntoIterator<Item = DiskPath>,
    C: ExistenceCheck + ?Sized,
{
    let mut report = apply_scan(store, disk_paths, mode, now);
    report.pruned = prune_missing(store, check);

    info!(
        scanned = report.scanned,
        added = report.added,
        updated = report.updated,
        skipped = report.skipped,
        pruned = report.pruned,
        errors = report.errors,
        "Ingestion complete"
    );
    report
}
