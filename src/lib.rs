//! fixity: content-addressable file integrity database
//!
//! Records the content fingerprint of every file in a directory tree and
//! later classifies the tree against that record as OK, MODIFIED, RENAMED,
//! MOVED, NEW or DELETED.

pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod progress;
pub mod reconcile;
pub mod scan;
pub mod store;
pub mod types;
pub mod workspace;
