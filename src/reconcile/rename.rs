//! Phase 2: merge MOVED and DELETED records that share a fingerprint.

use crate::reconcile::{Classification, RenamedGroup};
use crate::types::Fingerprint;
use std::collections::{BTreeMap, BTreeSet};

/// Collapse every fingerprint that has both moved paths and deleted paths
/// into one RENAMED group.
///
/// Pairing is by fingerprint only: all deleted paths become `old_paths`, all
/// moved paths become `new_paths`, whatever their names. Fingerprints present
/// on one side only are left as they are.
pub fn resolve_renames(mut classification: Classification) -> Classification {
    let mut moved_by_fp: BTreeMap<Fingerprint, Vec<String>> = BTreeMap::new();
    for moved in &classification.moved {
        moved_by_fp
            .entry(moved.fingerprint.clone())
            .or_default()
            .push(moved.path.clone());
    }

    let mut deleted_by_fp: BTreeMap<Fingerprint, Vec<String>> = BTreeMap::new();
    for deleted in &classification.deleted {
        deleted_by_fp
            .entry(deleted.original_fingerprint.clone())
            .or_default()
            .push(deleted.path.clone());
    }

    let merged: BTreeSet<Fingerprint> = moved_by_fp
        .keys()
        .filter(|fp| deleted_by_fp.contains_key(*fp))
        .cloned()
        .collect();
    if merged.is_empty() {
        return classification;
    }

    for fingerprint in &merged {
        let old_paths = deleted_by_fp.remove(fingerprint).unwrap_or_default();
        let new_paths = moved_by_fp.remove(fingerprint).unwrap_or_default();
        classification.renamed.push(RenamedGroup {
            fingerprint: fingerprint.clone(),
            old_paths,
            new_paths,
        });
    }

    classification
        .moved
        .retain(|moved| !merged.contains(&moved.fingerprint));
    classification
        .deleted
        .retain(|deleted| !merged.contains(&deleted.original_fingerprint));

    classification
}
