//! Merge rules for the configuration layers.

pub mod merge_policy;
