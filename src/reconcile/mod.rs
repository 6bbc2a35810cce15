//! Reconciliation Engine
//!
//! Pure diff between the Snapshot Store and a fresh [`DiskIndex`]. Runs in
//! two phases: [`partition`] classifies every path provisionally, then
//! [`resolve_renames`] merges MOVED and DELETED records that share a
//! fingerprint into RENAMED groups. Neither phase performs I/O.

pub mod partition;
pub mod rename;

pub use partition::partition;
pub use rename::resolve_renames;

use crate::store::SnapshotStore;
use crate::types::Fingerprint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Current state of the directory tree: relative path -> fingerprint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskIndex {
    files: BTreeMap<String, Fingerprint>,
}

impl DiskIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path, returning the fingerprint it replaced, if any.
    pub fn insert(&mut self, path: impl Into<String>, fingerprint: Fingerprint) -> Option<Fingerprint> {
        self.files.insert(path.into(), fingerprint)
    }

    pub fn get(&self, path: &str) -> Option<&Fingerprint> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths and fingerprints ordered by path.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Fingerprint)> {
        self.files.iter()
    }
}

impl FromIterator<(String, Fingerprint)> for DiskIndex {
    fn from_iter<T: IntoIterator<Item = (String, Fingerprint)>>(iter: T) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

/// Result categories, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Ok,
    Modified,
    Renamed,
    Moved,
    New,
    Deleted,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Ok,
        Category::Modified,
        Category::Renamed,
        Category::Moved,
        Category::New,
        Category::Deleted,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Ok => "OK",
            Category::Modified => "MODIFIED",
            Category::Renamed => "RENAMED",
            Category::Moved => "MOVED",
            Category::New => "NEW",
            Category::Deleted => "DELETED",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Category::Ok => "✓",
            Category::Modified => "⚠",
            Category::Renamed | Category::Moved => "↔",
            Category::New => "+",
            Category::Deleted => "✗",
        }
    }
}

/// Path present on disk with the content the store recorded for it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OkFile {
    pub path: String,
    pub fingerprint: Fingerprint,
}

/// Known path whose content changed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModifiedFile {
    pub path: String,
    pub original_fingerprint: Fingerprint,
    pub current_fingerprint: Fingerprint,
}

/// Known content found at a path the store never recorded for it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MovedFile {
    pub path: String,
    pub fingerprint: Fingerprint,
    pub known_old_paths: Vec<String>,
}

/// Content the store has never seen.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NewFile {
    pub path: String,
    pub fingerprint: Fingerprint,
}

/// Known path that is gone from disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeletedFile {
    pub path: String,
    pub original_fingerprint: Fingerprint,
}

/// Content whose old paths vanished while new paths appeared.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RenamedGroup {
    pub fingerprint: Fingerprint,
    pub old_paths: Vec<String>,
    pub new_paths: Vec<String>,
}

/// Six-way classification of a reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub ok: Vec<OkFile>,
    pub modified: Vec<ModifiedFile>,
    pub renamed: Vec<RenamedGroup>,
    pub moved: Vec<MovedFile>,
    pub new: Vec<NewFile>,
    pub deleted: Vec<DeletedFile>,
}

impl Classification {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Ok => self.ok.len(),
            Category::Modified => self.modified.len(),
            Category::Renamed => self.renamed.len(),
            Category::Moved => self.moved.len(),
            Category::New => self.new.len(),
            Category::Deleted => self.deleted.len(),
        }
    }

    /// Records outside the OK category (a RENAMED group counts once).
    pub fn discrepancies(&self) -> usize {
        Category::ALL
            .iter()
            .filter(|c| **c != Category::Ok)
            .map(|c| self.count(*c))
            .sum()
    }

    pub fn is_clean(&self) -> bool {
        self.discrepancies() == 0
    }

    /// Sort every category (and the path lists inside records) so output is
    /// stable across runs.
    pub fn sort(&mut self) {
        self.ok.sort();
        self.modified.sort();
        for moved in &mut self.moved {
            moved.known_old_paths.sort();
        }
        self.moved.sort();
        self.new.sort();
        self.deleted.sort();
        for group in &mut self.renamed {
            group.old_paths.sort();
            group.new_paths.sort();
        }
        self.renamed.sort();
    }
}

/// Classify every disk path and every stored path.
pub fn reconcile(store: &SnapshotStore, disk: &DiskIndex) -> Classification {
    let provisional = partition(store, disk);
    let classification = resolve_renames(provisional);
    debug!(
        ok = classification.ok.len(),
        modified = classification.modified.len(),
        renamed = classification.renamed.len(),
        moved = classification.moved.len(),
        new = classification.new.len(),
        deleted = classification.deleted.len(),
        "Reconciliation complete"
    );
    classification
}
