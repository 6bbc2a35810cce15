//! Ingestion properties

use super::strategies::{disk_paths, tree_strategy};
use fixity::ingest::{ingest, IngestMode};
use fixity::store::SnapshotStore;
use fixity::types::now;
use proptest::prelude::*;
use std::collections::HashSet;

fn mode_strategy() -> impl Strategy<Value = IngestMode> {
    prop_oneof![Just(IngestMode::AppendOnly), Just(IngestMode::Regenerate)]
}

proptest! {
    #[test]
    fn prop_invariants_hold_across_runs(
        runs in prop::collection::vec((tree_strategy(), mode_strategy()), 1..5)
    ) {
        let mut store = SnapshotStore::new();
        for (tree, mode) in runs {
            let present: HashSet<String> = tree.keys().cloned().collect();
            ingest(&mut store, disk_paths(&tree), mode, &|p: &str| present.contains(p), now());
            prop_assert!(store.check_invariants().is_ok());
            for entry in store.entries() {
                for record in &entry.paths {
                    prop_assert!(present.contains(&record.path));
                }
            }
        }
    }

    #[test]
    fn prop_append_only_never_rebinds(before in tree_strategy(), after in tree_strategy()) {
        let mut store = SnapshotStore::new();
        let all: HashSet<String> = before.keys().chain(after.keys()).cloned().collect();
        ingest(&mut store, disk_paths(&before), IngestMode::Regenerate, &|p: &str| all.contains(p), now());
        let snapshot = store.clone();

        let report = ingest(&mut store, disk_paths(&after), IngestMode::AppendOnly, &|p: &str| all.contains(p), now());
        prop_assert_eq!(report.pruned, 0);

        for entry in snapshot.entries() {
            for record in &entry.paths {
                prop_assert_eq!(store.locate(&record.path), Some(&entry.fingerprint));
            }
        }
    }

    #[test]
    fn prop_regenerate_matches_disk(before in tree_strategy(), after in tree_strategy()) {
        let mut store = SnapshotStore::new();
        let first: HashSet<String> = before.keys().cloned().collect();
        ingest(&mut store, disk_paths(&before), IngestMode::Regenerate, &|p: &str| first.contains(p), now());

        let second: HashSet<String> = after.keys().cloned().collect();
        ingest(&mut store, disk_paths(&after), IngestMode::Regenerate, &|p: &str| second.contains(p), now());

        prop_assert_eq!(store.path_count(), after.len());
        for (path, fingerprint) in &after {
            prop_assert_eq!(store.locate(path), Some(fingerprint));
        }
    }
}
