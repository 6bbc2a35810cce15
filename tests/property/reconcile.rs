//! Reconciliation properties

use super::strategies::{disk_index, disk_paths, tree_strategy};
use fixity::ingest::{ingest, IngestMode};
use fixity::reconcile::reconcile;
use fixity::store::SnapshotStore;
use fixity::types::now;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};

fn store_from(tree: &BTreeMap<String, fixity::types::Fingerprint>) -> SnapshotStore {
    let mut store = SnapshotStore::new();
    let present: HashSet<String> = tree.keys().cloned().collect();
    ingest(
        &mut store,
        disk_paths(tree),
        IngestMode::Regenerate,
        &|p: &str| present.contains(p),
        now(),
    );
    store
}

proptest! {
    #[test]
    fn prop_disk_paths_classified_exactly_once(before in tree_strategy(), after in tree_strategy()) {
        let store = store_from(&before);
        let disk = disk_index(&after);
        let c = reconcile(&store, &disk);

        let mut seen: Vec<String> = Vec::new();
        seen.extend(c.ok.iter().map(|r| r.path.clone()));
        seen.extend(c.modified.iter().map(|r| r.path.clone()));
        seen.extend(c.moved.iter().map(|r| r.path.clone()));
        seen.extend(c.new.iter().map(|r| r.path.clone()));
        seen.extend(c.renamed.iter().flat_map(|g| g.new_paths.iter().cloned()));
        seen.sort();

        let expected: Vec<String> = after.keys().cloned().collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn prop_vanished_store_paths_classified_exactly_once(before in tree_strategy(), after in tree_strategy()) {
        let store = store_from(&before);
        let disk = disk_index(&after);
        let c = reconcile(&store, &disk);

        let mut seen: Vec<String> = Vec::new();
        seen.extend(c.deleted.iter().map(|r| r.path.clone()));
        seen.extend(c.renamed.iter().flat_map(|g| g.old_paths.iter().cloned()));
        seen.sort();

        let expected: Vec<String> = before
            .keys()
            .filter(|p| !after.contains_key(*p))
            .cloned()
            .collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn prop_reconcile_is_deterministic(before in tree_strategy(), after in tree_strategy()) {
        let store = store_from(&before);
        let disk = disk_index(&after);
        let mut first = reconcile(&store, &disk);
        let mut second = reconcile(&store, &disk);
        first.sort();
        second.sort();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_ingest_then_reconcile_is_all_ok(tree in tree_strategy()) {
        let store = store_from(&tree);
        let c = reconcile(&store, &disk_index(&tree));
        prop_assert_eq!(c.ok.len(), tree.len());
        prop_assert!(c.is_clean());
    }

    #[test]
    fn prop_renamed_fingerprints_are_not_moved_or_deleted(before in tree_strategy(), after in tree_strategy()) {
        let store = store_from(&before);
        let c = reconcile(&store, &disk_index(&after));
        for group in &c.renamed {
            prop_assert!(!group.old_paths.is_empty());
            prop_assert!(!group.new_paths.is_empty());
            prop_assert!(c.moved.iter().all(|m| m.fingerprint != group.fingerprint));
            prop_assert!(c.deleted.iter().all(|d| d.original_fingerprint != group.fingerprint));
        }
    }
}
