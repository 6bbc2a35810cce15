//! Re-exports for consumers that depend on `crate::workspace` only.

pub use super::commands::IntegrityService;
pub use super::types::{IngestSummary, VerifySummary};
