//! CLI presentation: text and json formatters per command family.

mod ingest;
mod manual;
mod shared;
mod verify;

pub use ingest::{format_ingest_summary_json, format_ingest_summary_text};
pub use manual::manual_text;
pub use shared::{format_banner, format_section_heading};
pub use verify::{format_verify_summary_json, format_verify_summary_text, VerifyView};
