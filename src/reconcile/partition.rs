//! Phase 1: provisional partition of disk and store paths.

use crate::reconcile::{
    Classification, DeletedFile, DiskIndex, ModifiedFile, MovedFile, NewFile, OkFile,
};
use crate::store::SnapshotStore;
use std::collections::HashSet;

/// Classify every path into OK, MOVED, MODIFIED, DELETED or NEW. RENAMED is
/// always empty after this phase.
///
/// A disk path that the store already binds to a different fingerprint is
/// reported as MODIFIED only, even when its new content is known under some
/// other path. That keeps every disk path in exactly one disk-side category.
pub fn partition(store: &SnapshotStore, disk: &DiskIndex) -> Classification {
    let mut result = Classification::default();
    let mut accounted: HashSet<&str> = HashSet::with_capacity(disk.len());

    for (path, fingerprint) in disk.iter() {
        if store.contains(fingerprint, path) {
            result.ok.push(OkFile {
                path: path.clone(),
                fingerprint: fingerprint.clone(),
            });
            accounted.insert(path.as_str());
            continue;
        }
        if store.locate(path).is_some() {
            // Bound elsewhere: the store-side pass reports it as MODIFIED.
            continue;
        }
        if let Some(entry) = store.get(fingerprint) {
            result.moved.push(MovedFile {
                path: path.clone(),
                fingerprint: fingerprint.clone(),
                known_old_paths: entry.path_names(),
            });
            accounted.insert(path.as_str());
        }
    }

    for entry in store.entries() {
        for record in &entry.paths {
            match disk.get(&record.path) {
                Some(current) if *current == entry.fingerprint => {}
                Some(current) => {
                    result.modified.push(ModifiedFile {
                        path: record.path.clone(),
                        original_fingerprint: entry.fingerprint.clone(),
                        current_fingerprint: current.clone(),
                    });
                    accounted.insert(record.path.as_str());
                }
                None => result.deleted.push(DeletedFile {
                    path: record.path.clone(),
                    original_fingerprint: entry.fingerprint.clone(),
                }),
            }
        }
    }

    for (path, fingerprint) in disk.iter() {
        if !accounted.contains(path.as_str()) {
            result.new.push(NewFile {
                path: path.clone(),
                fingerprint: fingerprint.clone(),
            });
        }
    }

    result
}
