//! Loading damaged or hand-edited databases

use super::test_utils::TestWorkspace;
use fixity::scan::hasher::fingerprint_bytes;
use fixity::store::{load_or_empty, load_snapshot, save_snapshot, LoadWarning, SnapshotStore};
use fixity::types::{now, Fingerprint};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::Path;

fn write_gzip_json(path: &Path, value: &serde_json::Value) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(serde_json::to_string(value).unwrap().as_bytes())
        .unwrap();
    encoder.finish().unwrap();
}

fn entry(fp: &str, paths: &[(&str, &str)]) -> serde_json::Value {
    let records: Vec<serde_json::Value> = paths
        .iter()
        .map(|(path, seen)| {
            serde_json::json!({ "path": path, "first_seen": seen, "last_seen": seen })
        })
        .collect();
    serde_json::json!({
        "fingerprint": fp,
        "paths": records,
        "first_created": "2024-01-01T00:00:00Z",
        "last_content_update": "2024-01-01T00:00:00Z",
    })
}

#[test]
fn test_garbage_file_degrades_to_empty_store() {
    let ws = TestWorkspace::new();
    std::fs::write(ws.database(), b"definitely not gzip").unwrap();

    let (store, warning) = load_or_empty(ws.database());
    assert!(store.is_empty());
    assert!(matches!(warning, Some(LoadWarning::Unreadable { .. })));
}

#[test]
fn test_ingest_recovers_from_garbage_file() {
    let ws = TestWorkspace::new();
    ws.write("a.txt", "alpha");
    std::fs::write(ws.database(), b"definitely not gzip").unwrap();

    let summary = ws.service().regenerate().unwrap();
    assert_eq!(summary.report.added, 1);
    assert!(!summary.warnings.is_empty());

    let (store, notes) = load_snapshot(ws.database()).unwrap();
    assert!(notes.is_empty());
    assert_eq!(store.path_count(), 1);
}

#[test]
fn test_malformed_entries_are_dropped() {
    let ws = TestWorkspace::new();
    let good = "a".repeat(32);
    let mismatched = "b".repeat(32);
    let document = serde_json::json!({
        good.clone(): entry(&good, &[("good.txt", "2024-01-01T00:00:00Z")]),
        "NOT-HEX": entry(&good, &[("bad-key.txt", "2024-01-01T00:00:00Z")]),
        mismatched.clone(): entry(&"c".repeat(32), &[("mismatch.txt", "2024-01-01T00:00:00Z")]),
        "d".repeat(32): { "fingerprint": "d".repeat(32) },
    });
    write_gzip_json(&ws.database(), &document);

    let (store, notes) = load_snapshot(ws.database()).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.locate("good.txt").map(|f| f.as_str()), Some(good.as_str()));
    assert_eq!(notes.len(), 3);
    assert!(store.check_invariants().is_ok());

    let (_, warning) = load_or_empty(ws.database());
    match warning {
        Some(LoadWarning::Repaired { notes, .. }) => assert_eq!(notes.len(), 3),
        other => panic!("expected repair warning, got {:?}", other),
    }
}

#[test]
fn test_path_bound_twice_keeps_latest() {
    let ws = TestWorkspace::new();
    let older = "1".repeat(32);
    let newer = "2".repeat(32);
    let document = serde_json::json!({
        older.clone(): entry(&older, &[("shared.txt", "2024-01-01T00:00:00Z"), ("other.txt", "2024-01-01T00:00:00Z")]),
        newer.clone(): entry(&newer, &[("shared.txt", "2024-06-01T00:00:00Z")]),
    });
    write_gzip_json(&ws.database(), &document);

    let (store, notes) = load_snapshot(ws.database()).unwrap();
    assert_eq!(store.locate("shared.txt").map(|f| f.as_str()), Some(newer.as_str()));
    assert_eq!(store.locate("other.txt").map(|f| f.as_str()), Some(older.as_str()));
    assert_eq!(notes.len(), 1);
    assert!(store.check_invariants().is_ok());
}

#[test]
fn test_save_is_atomic_and_reloadable() {
    let ws = TestWorkspace::new();
    let mut store = SnapshotStore::new();
    let fp = Fingerprint::parse(&fingerprint_bytes(b"content")).unwrap();
    store.bind("dir/file.txt", &fp, now());

    let target = ws.path("nested/checksums.json.gz");
    save_snapshot(&store, &target, 9).unwrap();
    assert!(target.exists());
    assert!(!ws.path("nested/checksums.json.gz.tmp").exists());

    let (loaded, notes) = load_snapshot(&target).unwrap();
    assert!(notes.is_empty());
    assert_eq!(loaded, store);
}
