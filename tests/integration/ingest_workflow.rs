//! Add / regenerate workflows against a real directory

use super::test_utils::TestWorkspace;
use fixity::ingest::IngestMode;
use fixity::scan::hasher::fingerprint_bytes;
use fixity::store::load_snapshot;
use fixity::types::Fingerprint;

fn fingerprint(content: &str) -> Fingerprint {
    Fingerprint::parse(&fingerprint_bytes(content.as_bytes())).unwrap()
}

#[test]
fn test_regenerate_creates_database() {
    let ws = TestWorkspace::new();
    ws.write("a.txt", "alpha");
    ws.write("docs/b.txt", "beta");
    ws.write("docs/copy-of-a.txt", "alpha");

    let summary = ws.service().regenerate().unwrap();
    assert_eq!(summary.mode, IngestMode::Regenerate);
    assert_eq!(summary.report.scanned, 3);
    assert_eq!(summary.report.added, 3);
    assert_eq!(summary.fingerprints_in_db, 2);

    let (store, notes) = load_snapshot(ws.database()).unwrap();
    assert!(notes.is_empty());
    assert!(store.check_invariants().is_ok());
    let entry = store.get(&fingerprint("alpha")).unwrap();
    assert_eq!(entry.path_names(), vec!["a.txt", "docs/copy-of-a.txt"]);
}

#[test]
fn test_database_file_is_never_scanned() {
    let ws = TestWorkspace::new();
    ws.write("a.txt", "alpha");
    let svc = ws.service();
    svc.regenerate().unwrap();

    let second = svc.regenerate().unwrap();
    assert_eq!(second.report.scanned, 1);
    let (store, _) = load_snapshot(ws.database()).unwrap();
    assert!(store.locate("checksums.json.gz").is_none());
}

#[test]
fn test_add_leaves_modified_files_alone() {
    let ws = TestWorkspace::new();
    ws.write("a.txt", "alpha");
    ws.write("b.txt", "beta");
    let svc = ws.service();
    svc.regenerate().unwrap();

    ws.write("a.txt", "alpha v2");
    ws.write("c.txt", "gamma");
    let summary = svc.add().unwrap();
    assert_eq!(summary.report.added, 1);
    assert_eq!(summary.report.skipped, 1);
    assert_eq!(summary.report.updated, 1);

    let (store, _) = load_snapshot(ws.database()).unwrap();
    assert_eq!(store.locate("a.txt"), Some(&fingerprint("alpha")));
    assert_eq!(store.locate("c.txt"), Some(&fingerprint("gamma")));

    let verify = svc.verify().unwrap();
    assert_eq!(verify.classification.modified.len(), 1);
    assert_eq!(verify.classification.modified[0].path, "a.txt");
}

#[test]
fn test_regenerate_rebinds_modified_files() {
    let ws = TestWorkspace::new();
    ws.write("a.txt", "alpha");
    let svc = ws.service();
    svc.regenerate().unwrap();

    ws.write("a.txt", "alpha v2");
    let summary = svc.regenerate().unwrap();
    assert_eq!(summary.report.updated, 1);
    assert_eq!(summary.fingerprints_in_db, 1);

    let (store, _) = load_snapshot(ws.database()).unwrap();
    assert!(store.get(&fingerprint("alpha")).is_none());
    assert_eq!(store.locate("a.txt"), Some(&fingerprint("alpha v2")));
    assert!(svc.verify().unwrap().classification.is_clean());
}

#[test]
fn test_deleted_files_are_pruned_in_both_modes() {
    let ws = TestWorkspace::new();
    ws.write("a.txt", "alpha");
    ws.write("b.txt", "beta");
    ws.write("c.txt", "gamma");
    let svc = ws.service();
    svc.regenerate().unwrap();

    ws.remove("b.txt");
    let summary = svc.add().unwrap();
    assert_eq!(summary.report.pruned, 1);

    ws.remove("c.txt");
    let summary = svc.regenerate().unwrap();
    assert_eq!(summary.report.pruned, 1);

    let (store, _) = load_snapshot(ws.database()).unwrap();
    assert_eq!(store.path_count(), 1);
    assert!(store.get(&fingerprint("beta")).is_none());
}

#[test]
fn test_moved_file_is_rebound_by_regenerate() {
    let ws = TestWorkspace::new();
    ws.write("old/name.txt", "content");
    let svc = ws.service();
    svc.regenerate().unwrap();

    ws.rename("old/name.txt", "new/name.txt");
    svc.regenerate().unwrap();

    let (store, _) = load_snapshot(ws.database()).unwrap();
    let entry = store.get(&fingerprint("content")).unwrap();
    assert_eq!(entry.path_names(), vec!["new/name.txt"]);
    assert!(store.check_invariants().is_ok());
}

#[test]
fn test_decomposed_unicode_name_round_trips() {
    let ws = TestWorkspace::new();
    ws.write("cafe\u{301}.txt", "alpha");
    ws.write("plain.txt", "beta");
    let svc = ws.service();

    let summary = svc.regenerate().unwrap();
    assert_eq!(summary.report.added, 2);
    assert_eq!(summary.report.pruned, 0);

    let (store, _) = load_snapshot(ws.database()).unwrap();
    assert_eq!(store.path_count(), 2);

    let verify = svc.verify().unwrap();
    assert!(verify.classification.is_clean());
    assert_eq!(verify.classification.ok.len(), 2);

    let again = svc.add().unwrap();
    assert_eq!(again.report.pruned, 0);
    assert_eq!(again.report.added, 0);
}

#[test]
fn test_composed_and_decomposed_names_stay_distinct() {
    let ws = TestWorkspace::new();
    ws.write("caf\u{e9}.txt", "alpha");
    ws.write("cafe\u{301}.txt", "beta");
    let svc = ws.service();

    let summary = svc.regenerate().unwrap();
    let (store, _) = load_snapshot(ws.database()).unwrap();
    // Filesystems that normalize names keep only one of the two files.
    assert_eq!(store.path_count(), summary.report.scanned);
    assert_eq!(summary.report.pruned, 0);
    assert!(svc.verify().unwrap().classification.is_clean());
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_name_is_reported_not_stored() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let ws = TestWorkspace::new();
    ws.write("plain.txt", "beta");
    std::fs::write(ws.root().join(OsStr::from_bytes(b"bad\xff.txt")), "raw").unwrap();
    let svc = ws.service();

    let summary = svc.regenerate().unwrap();
    assert_eq!(summary.report.added, 1);
    assert_eq!(summary.report.errors, 1);
    assert_eq!(summary.report.pruned, 0);
    assert!(summary.warnings.iter().any(|w| w.starts_with("name error")));

    let (store, _) = load_snapshot(ws.database()).unwrap();
    assert_eq!(store.path_count(), 1);
    assert_eq!(store.locate("plain.txt"), Some(&fingerprint("beta")));
    assert!(svc.verify().unwrap().classification.is_clean());
}
