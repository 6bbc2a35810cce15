//! Persistence layer for the Snapshot Store
//!
//! The database is a gzip-compressed JSON object mapping each fingerprint to
//! its entry. Loading is lenient: malformed entries are dropped with a warning
//! and an undecodable file degrades to an empty store.

use crate::error::StorageError;
use crate::store::{ContentEntry, SnapshotStore};
use crate::types::Fingerprint;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default gzip level for saved snapshots.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Something non-fatal that happened while loading the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The file could not be read or decoded; the store starts empty.
    Unreadable { path: PathBuf, reason: String },
    /// Individual entries were dropped or repaired.
    Repaired { path: PathBuf, notes: Vec<String> },
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadWarning::Unreadable { path, reason } => write!(
                f,
                "Could not parse existing checksum file {}: {}. Starting fresh.",
                path.display(),
                reason
            ),
            LoadWarning::Repaired { path, notes } => write!(
                f,
                "Repaired {} problem(s) in checksum file {}",
                notes.len(),
                path.display()
            ),
        }
    }
}

/// Load the database at `path`.
///
/// A missing file is an empty store. Returns the store and any repair notes.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<(SnapshotStore, Vec<String>), StorageError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "No checksum database yet");
        return Ok((SnapshotStore::new(), Vec::new()));
    }

    let file = fs::File::open(path)?;
    let decoder = GzDecoder::new(BufReader::new(file));
    let raw: BTreeMap<String, serde_json::Value> = serde_json::from_reader(decoder)
        .map_err(|e| StorageError::Corrupt(format!("{}", e)))?;

    let mut notes = Vec::new();
    let mut entries = Vec::with_capacity(raw.len());
    for (key, value) in raw {
        let key_fp = match Fingerprint::parse(&key) {
            Ok(fp) => fp,
            Err(e) => {
                notes.push(format!("entry with invalid key {:?} dropped: {}", key, e));
                continue;
            }
        };
        let entry: ContentEntry = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                notes.push(format!("entry {} dropped: {}", key_fp, e));
                continue;
            }
        };
        if entry.fingerprint != key_fp {
            notes.push(format!(
                "entry {} recorded fingerprint {}; dropped",
                key_fp, entry.fingerprint
            ));
            continue;
        }
        entries.push(entry);
    }

    let (store, repairs) = SnapshotStore::from_entries(entries);
    notes.extend(repairs);
    debug!(
        path = %path.display(),
        fingerprints = store.len(),
        paths = store.path_count(),
        "Loaded checksum database"
    );
    Ok((store, notes))
}

/// Load the database, degrading to an empty store on any failure.
pub fn load_or_empty<P: AsRef<Path>>(path: P) -> (SnapshotStore, Option<LoadWarning>) {
    let path = path.as_ref();
    match load_snapshot(path) {
        Ok((store, notes)) if notes.is_empty() => (store, None),
        Ok((store, notes)) => (
            store,
            Some(LoadWarning::Repaired {
                path: path.to_path_buf(),
                notes,
            }),
        ),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Checksum database unreadable, starting empty");
            (
                SnapshotStore::new(),
                Some(LoadWarning::Unreadable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }),
            )
        }
    }
}

/// Save the database atomically (temporary sibling file, then rename).
pub fn save_snapshot<P: AsRef<Path>>(
    store: &SnapshotStore,
    path: P,
    compression_level: u32,
) -> Result<(), StorageError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let document: BTreeMap<&str, &ContentEntry> = store
        .entries()
        .map(|entry| (entry.fingerprint.as_str(), entry))
        .collect();

    let file_name = path
        .file_name()
        .ok_or_else(|| StorageError::InvalidPath(format!("{}", path.display())))?;
    let mut temp_name = file_name.to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let write_result = (|| -> Result<(), StorageError> {
        let file = fs::File::create(&temp_path)?;
        let mut encoder =
            GzEncoder::new(BufWriter::new(file), Compression::new(compression_level.min(9)));
        serde_json::to_writer(&mut encoder, &document)
            .map_err(|e| StorageError::Encode(e.to_string()))?;
        let mut writer = encoder.finish()?;
        writer.flush()?;
        Ok(())
    })();

    if let Err(e) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        StorageError::IoError(e)
    })?;

    debug!(
        path = %path.display(),
        fingerprints = store.len(),
        "Saved checksum database"
    );
    Ok(())
}
