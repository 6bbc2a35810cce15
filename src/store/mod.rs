//! Snapshot Store
//!
//! The content-addressable database: fingerprint -> every relative path seen
//! with that content. A reverse index (path -> fingerprint) is kept alongside
//! the forward map so that locating a path and enforcing "one fingerprint per
//! path" are constant time. The reverse index is derived state and can always
//! be rebuilt from the entries.

pub mod persistence;

pub use persistence::{load_or_empty, load_snapshot, save_snapshot, LoadWarning};

use crate::error::InvariantViolation;
use crate::types::{Fingerprint, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// One relative path observed with a given content fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRecord {
    pub path: String,
    pub first_seen: Timestamp,
    pub last_seen: Timestamp,
}

/// All known paths sharing one fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub fingerprint: Fingerprint,
    pub paths: Vec<PathRecord>,
    pub first_created: Timestamp,
    pub last_content_update: Timestamp,
}

impl ContentEntry {
    fn new(fingerprint: Fingerprint, now: Timestamp) -> Self {
        Self {
            fingerprint,
            paths: Vec::new(),
            first_created: now,
            last_content_update: now,
        }
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p.path == path)
    }

    /// Paths in recorded order.
    pub fn path_names(&self) -> Vec<String> {
        self.paths.iter().map(|p| p.path.clone()).collect()
    }
}

/// Result of binding a path to a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// The path was unknown to the store.
    Added,
    /// The path was already bound to this fingerprint; `last_seen` refreshed.
    Refreshed,
    /// The path moved here from another fingerprint's entry.
    Rebound { from: Fingerprint },
}

/// The content-addressable snapshot database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotStore {
    entries: BTreeMap<Fingerprint, ContentEntry>,
    by_path: HashMap<String, Fingerprint>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from decoded entries, repairing anything that would break
    /// the store invariants.
    ///
    /// Empty entries are dropped. Duplicate paths within an entry collapse to
    /// the first record. A path found under two fingerprints keeps the binding
    /// with the most recent `last_seen`. Returns the store and one note per
    /// repair.
    pub fn from_entries<I>(entries: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = ContentEntry>,
    {
        let mut notes = Vec::new();
        let mut winners: HashMap<String, (Fingerprint, Timestamp)> = HashMap::new();
        let mut staged: BTreeMap<Fingerprint, ContentEntry> = BTreeMap::new();

        for mut entry in entries {
            let mut seen = std::collections::HashSet::new();
            entry.paths.retain(|p| {
                let fresh = seen.insert(p.path.clone());
                if !fresh {
                    notes.push(format!(
                        "duplicate path {} in entry {} dropped",
                        p.path, entry.fingerprint
                    ));
                }
                fresh
            });
            for record in &entry.paths {
                match winners.get(&record.path) {
                    Some((_, last_seen)) if *last_seen >= record.last_seen => {}
                    _ => {
                        winners.insert(
                            record.path.clone(),
                            (entry.fingerprint.clone(), record.last_seen),
                        );
                    }
                }
            }
            if let Some(existing) = staged.get_mut(&entry.fingerprint) {
                notes.push(format!("entry {} appeared twice; merged", entry.fingerprint));
                for record in entry.paths {
                    if !existing.contains_path(&record.path) {
                        existing.paths.push(record);
                    }
                }
            } else {
                staged.insert(entry.fingerprint.clone(), entry);
            }
        }

        let mut store = SnapshotStore::new();
        for (fingerprint, mut entry) in staged {
            entry.paths.retain(|record| {
                let keep = winners
                    .get(&record.path)
                    .map(|(winner, _)| *winner == fingerprint)
                    .unwrap_or(false);
                if !keep {
                    notes.push(format!(
                        "path {} was also bound to {}; kept the most recent binding",
                        record.path, fingerprint
                    ));
                }
                keep
            });
            if entry.paths.is_empty() {
                notes.push(format!("empty entry {} dropped", fingerprint));
                continue;
            }
            for record in &entry.paths {
                store.by_path.insert(record.path.clone(), fingerprint.clone());
            }
            store.entries.insert(fingerprint, entry);
        }

        for note in &notes {
            warn!("{}", note);
        }
        (store, notes)
    }

    /// Number of distinct fingerprints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of path records across all entries.
    pub fn path_count(&self) -> usize {
        self.by_path.len()
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&ContentEntry> {
        self.entries.get(fingerprint)
    }

    /// Entries ordered by fingerprint.
    pub fn entries(&self) -> impl Iterator<Item = &ContentEntry> {
        self.entries.values()
    }

    /// Fingerprint a path is currently bound to.
    pub fn locate(&self, path: &str) -> Option<&Fingerprint> {
        self.by_path.get(path)
    }

    /// Whether the entry for `fingerprint` records `path`.
    pub fn contains(&self, fingerprint: &Fingerprint, path: &str) -> bool {
        self.by_path.get(path) == Some(fingerprint)
    }

    /// Bind `path` to `fingerprint`, moving it out of any other entry first.
    ///
    /// Every entry whose path set changes (or whose record is refreshed) gets
    /// `last_content_update = now`.
    pub fn bind(&mut self, path: &str, fingerprint: &Fingerprint, now: Timestamp) -> Binding {
        let outcome = match self.by_path.get(path).cloned() {
            Some(current) if current == *fingerprint => {
                if let Some(entry) = self.entries.get_mut(fingerprint) {
                    if let Some(record) = entry.paths.iter_mut().find(|p| p.path == path) {
                        record.last_seen = now;
                    }
                    entry.last_content_update = now;
                }
                return Binding::Refreshed;
            }
            Some(previous) => {
                self.detach(path, &previous, Some(now));
                Binding::Rebound { from: previous }
            }
            None => Binding::Added,
        };

        let entry = self
            .entries
            .entry(fingerprint.clone())
            .or_insert_with(|| ContentEntry::new(fingerprint.clone(), now));
        entry.paths.push(PathRecord {
            path: path.to_string(),
            first_seen: now,
            last_seen: now,
        });
        entry.last_content_update = now;
        self.by_path.insert(path.to_string(), fingerprint.clone());
        outcome
    }

    /// Remove `path` from whichever entry holds it.
    pub fn unbind(&mut self, path: &str) -> Option<(Fingerprint, PathRecord)> {
        let fingerprint = self.by_path.get(path).cloned()?;
        self.detach(path, &fingerprint, None)
            .map(|record| (fingerprint, record))
    }

    /// Drop every path record for which `keep` returns false. Entries left
    /// empty are deleted. Returns the removed `(fingerprint, path)` pairs.
    pub fn retain_paths<F>(&mut self, mut keep: F) -> Vec<(Fingerprint, String)>
    where
        F: FnMut(&str) -> bool,
    {
        let mut removed = Vec::new();
        for (fingerprint, entry) in self.entries.iter_mut() {
            entry.paths.retain(|record| {
                let kept = keep(&record.path);
                if !kept {
                    removed.push((fingerprint.clone(), record.path.clone()));
                }
                kept
            });
        }
        self.entries.retain(|_, entry| !entry.paths.is_empty());
        for (_, path) in &removed {
            self.by_path.remove(path);
        }
        removed
    }

    /// Recompute the reverse index from the entries.
    pub fn rebuild_index(&mut self) {
        self.by_path = self
            .entries
            .iter()
            .flat_map(|(fingerprint, entry)| {
                entry
                    .paths
                    .iter()
                    .map(move |record| (record.path.clone(), fingerprint.clone()))
            })
            .collect();
    }

    /// Verify the store invariants: no empty entries, keys match recorded
    /// fingerprints, each path bound once, reverse index in sync.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut owners: HashMap<&str, &Fingerprint> = HashMap::new();
        for (key, entry) in &self.entries {
            if entry.paths.is_empty() {
                return Err(InvariantViolation::EmptyEntry(key.clone()));
            }
            if entry.fingerprint != *key {
                return Err(InvariantViolation::KeyMismatch {
                    key: key.clone(),
                    recorded: entry.fingerprint.clone(),
                });
            }
            for record in &entry.paths {
                if let Some(first) = owners.insert(record.path.as_str(), key) {
                    return Err(InvariantViolation::PathBoundTwice {
                        path: record.path.clone(),
                        first: first.clone(),
                        second: key.clone(),
                    });
                }
                if self.by_path.get(&record.path) != Some(key) {
                    return Err(InvariantViolation::StaleIndex(record.path.clone()));
                }
            }
        }
        if owners.len() != self.by_path.len() {
            let stale = self
                .by_path
                .keys()
                .find(|path| !owners.contains_key(path.as_str()))
                .cloned()
                .unwrap_or_default();
            return Err(InvariantViolation::StaleIndex(stale));
        }
        Ok(())
    }

    fn detach(
        &mut self,
        path: &str,
        fingerprint: &Fingerprint,
        now: Option<Timestamp>,
    ) -> Option<PathRecord> {
        let entry = self.entries.get_mut(fingerprint)?;
        let position = entry.paths.iter().position(|p| p.path == path)?;
        let record = entry.paths.remove(position);
        if entry.paths.is_empty() {
            self.entries.remove(fingerprint);
        } else if let Some(now) = now {
            entry.last_content_update = now;
        }
        self.by_path.remove(path);
        Some(record)
    }
}
