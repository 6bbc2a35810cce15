//! Workspace command service: one entry point per workflow.
//!
//! Owns the workflow logic; the CLI parses, calls one method and formats the
//! returned summary.

use crate::config::FixityConfig;
use crate::error::ApiError;
use crate::ingest::{self, IngestMode, RootedExistence};
use crate::progress::ScanProgress;
use crate::reconcile;
use crate::scan::{path, ScanOutcome, Scanner};
use crate::store::{self, LoadWarning, SnapshotStore};
use crate::types;
use crate::workspace::types::{IngestSummary, VerifySummary};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Runs the integrity workflows against one workspace directory.
pub struct IntegrityService {
    workspace_root: PathBuf,
    config: FixityConfig,
    show_progress: bool,
}

impl IntegrityService {
    pub fn new(workspace_root: &Path, config: FixityConfig) -> Result<Self, ApiError> {
        let workspace_root = path::canonical_root(workspace_root)?;
        let show_progress = config.scan.show_progress;
        Ok(Self {
            workspace_root,
            config,
            show_progress,
        })
    }

    /// Force progress bars off (quiet mode, JSON output).
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &FixityConfig {
        &self.config
    }

    pub fn database_path(&self) -> PathBuf {
        self.config.database.path_in(&self.workspace_root)
    }

    /// Record files the database has never seen; existing records stay as they are.
    pub fn add(&self) -> Result<IngestSummary, ApiError> {
        self.ingest(IngestMode::AppendOnly)
    }

    /// Rebind every file to its current content.
    pub fn regenerate(&self) -> Result<IngestSummary, ApiError> {
        self.ingest(IngestMode::Regenerate)
    }

    #[instrument(skip(self), fields(workspace = %self.workspace_root.display()))]
    fn ingest(&self, mode: IngestMode) -> Result<IngestSummary, ApiError> {
        let started = Instant::now();
        let outcome = self.scan("Hashing")?;
        if outcome.files.is_empty() && outcome.issues.is_empty() {
            return Err(ApiError::NothingToScan(self.workspace_root.clone()));
        }

        let database = self.database_path();
        let (mut store, load_warning) = store::load_or_empty(&database);
        let mut warnings = Vec::new();
        if let Some(warning) = load_warning {
            warn!("{}", warning);
            warnings.extend(describe_load_warning(&warning));
        }

        let mut report = ingest::apply_scan(&mut store, outcome.disk_paths(), mode, types::now());
        report.errors += outcome.error_count();
        warnings.extend(outcome.issues.iter().map(|issue| issue.to_string()));

        report.pruned = self.prune(&mut store);

        store::save_snapshot(&store, &database, self.config.database.compression_level)?;

        info!(
            mode = ?mode,
            added = report.added,
            updated = report.updated,
            skipped = report.skipped,
            pruned = report.pruned,
            errors = report.errors,
            "Database updated"
        );

        Ok(IngestSummary {
            mode,
            database,
            report,
            fingerprints_in_db: store.len(),
            warnings,
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }

    fn prune(&self, store: &mut SnapshotStore) -> usize {
        let progress =
            ScanProgress::for_run(self.show_progress, store.path_count() as u64, "Pruning");
        let existence = RootedExistence::new(self.workspace_root.clone());
        let check = |relative: &str| {
            progress.set_current(relative);
            progress.inc();
            ingest::ExistenceCheck::exists(&existence, relative)
        };
        let pruned = ingest::prune_missing(store, &check);
        progress.finish();
        pruned
    }

    /// Compare the database against the current state of the workspace.
    #[instrument(skip(self), fields(workspace = %self.workspace_root.display()))]
    pub fn verify(&self) -> Result<VerifySummary, ApiError> {
        let started = Instant::now();
        let database = self.database_path();
        if !database.exists() {
            return Err(ApiError::DatabaseMissing(database));
        }

        let (store, load_warning) = store::load_or_empty(&database);
        let mut warnings = Vec::new();
        if let Some(warning) = load_warning {
            warn!("{}", warning);
            warnings.extend(describe_load_warning(&warning));
        }

        let outcome = self.scan("Verifying")?;
        warnings.extend(outcome.issues.iter().map(|issue| issue.to_string()));

        let disk = outcome.disk_index();
        let mut classification = reconcile::reconcile(&store, &disk);
        classification.sort();

        info!(
            files = disk.len(),
            discrepancies = classification.discrepancies(),
            "Verification complete"
        );

        Ok(VerifySummary {
            database,
            files_on_disk: disk.len(),
            fingerprints_in_db: store.len(),
            paths_in_db: store.path_count(),
            classification,
            warnings,
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }

    fn scan(&self, label: &str) -> Result<ScanOutcome, ApiError> {
        let scanner = Scanner::new(self.workspace_root.clone(), self.config.walker_config());
        let progress = ScanProgress::for_run(self.show_progress, 0, label);
        Ok(scanner.scan(&progress)?)
    }
}

fn describe_load_warning(warning: &LoadWarning) -> Vec<String> {
    match warning {
        LoadWarning::Unreadable { .. } => vec![warning.to_string()],
        LoadWarning::Repaired { notes, .. } => {
            let mut lines = vec![warning.to_string()];
            lines.extend(notes.iter().cloned());
            lines
        }
    }
}
