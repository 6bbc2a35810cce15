//! Shared proptest strategies. Small alphabets force fingerprint collisions,
//! duplicate content and path reuse.

use fixity::ingest::DiskPath;
use fixity::reconcile::DiskIndex;
use fixity::types::Fingerprint;
use proptest::prelude::*;
use std::collections::BTreeMap;

pub fn fingerprint(seed: u8) -> Fingerprint {
    let c = char::from_digit(u32::from(seed % 16), 16).unwrap();
    Fingerprint::parse(&c.to_string().repeat(32)).unwrap()
}

pub fn path_strategy() -> impl Strategy<Value = String> {
    (0u8..3, 0u8..6).prop_map(|(dir, file)| match dir {
        0 => format!("f{}.txt", file),
        d => format!("d{}/f{}.txt", d, file),
    })
}

/// A directory snapshot: unique paths, each with a fingerprint from a small set.
pub fn tree_strategy() -> impl Strategy<Value = BTreeMap<String, Fingerprint>> {
    prop::collection::btree_map(path_strategy(), (0u8..6).prop_map(fingerprint), 0..12)
}

pub fn disk_index(tree: &BTreeMap<String, Fingerprint>) -> DiskIndex {
    tree.iter().map(|(p, f)| (p.clone(), f.clone())).collect()
}

pub fn disk_paths(tree: &BTreeMap<String, Fingerprint>) -> Vec<DiskPath> {
    tree.iter()
        .map(|(p, f)| DiskPath::from((p.clone(), f.clone())))
        .collect()
}
