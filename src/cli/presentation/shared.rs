//! Shared presentation: banner, section headings and JSON encoding.

use crate::error::{ApiError, StorageError};
use owo_colors::OwoColorize;
use serde::Serialize;

pub(crate) const RULE: &str =
    "────────────────────────────────────────────────────────────────";
pub(crate) const DOUBLE_RULE: &str =
    "════════════════════════════════════════════════════════════════";

/// Boxed title used at the top of every report.
pub fn format_section_heading(title: &str, color: bool) -> String {
    let width = DOUBLE_RULE.chars().count();
    let inner = format!("{:^width$}", title, width = width);
    let middle = if color {
        format!("║{}║", inner.bold())
    } else {
        format!("║{}║", inner)
    };
    format!("╔{}╗\n{}\n╚{}╝", DOUBLE_RULE, middle, DOUBLE_RULE)
}

/// Banner shown above the interactive menu.
pub fn format_banner(color: bool) -> String {
    let title = format!("fixity {}", env!("CARGO_PKG_VERSION"));
    let subtitle = "content-addressable integrity checker";
    let title = if color {
        title.bold().to_string()
    } else {
        title
    };
    format!("{}\n  {}\n  {}\n{}", DOUBLE_RULE, title, subtitle, DOUBLE_RULE)
}

pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::StorageError(StorageError::Encode(e.to_string())))
}
