//! Add / regenerate summaries.

use super::shared::{format_section_heading, to_pretty_json, DOUBLE_RULE, RULE};
use crate::error::ApiError;
use crate::ingest::IngestMode;
use crate::workspace::IngestSummary;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_ingest_summary_text(summary: &IngestSummary, color: bool) -> String {
    let title = match summary.mode {
        IngestMode::Regenerate => "CHECKSUM REGENERATION COMPLETE",
        IngestMode::AppendOnly => "NEW FILES ADDED TO DATABASE",
    };
    let report = &summary.report;

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Metric", "Count"]);
    table.add_row(vec!["Files scanned".to_string(), report.scanned.to_string()]);
    table.add_row(vec![
        "Successfully processed".to_string(),
        report.processed.to_string(),
    ]);
    table.add_row(vec!["New paths added".to_string(), report.added.to_string()]);
    table.add_row(vec![
        "Existing paths updated".to_string(),
        report.updated.to_string(),
    ]);
    if summary.mode == IngestMode::AppendOnly {
        table.add_row(vec![
            "Changed paths left unchanged".to_string(),
            report.skipped.to_string(),
        ]);
    }
    table.add_row(vec!["Missing paths pruned".to_string(), report.pruned.to_string()]);
    if report.errors > 0 {
        table.add_row(vec!["Errors encountered".to_string(), report.errors.to_string()]);
    }

    let mut out = format_section_heading(title, color);
    out.push('\n');
    out.push_str(&table.to_string());

    if !summary.warnings.is_empty() {
        out.push_str(&format!("\n\nWarnings ({}):", summary.warnings.len()));
        for warning in &summary.warnings {
            out.push_str(&format!("\n  - {}", warning));
        }
    }

    let saved = format!("✓ Database saved to: {}", summary.database.display());
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    if color {
        out.push_str(&saved.green().to_string());
    } else {
        out.push_str(&saved);
    }
    out.push('\n');
    out.push_str(DOUBLE_RULE);
    out
}

pub fn format_ingest_summary_json(summary: &IngestSummary) -> Result<String, ApiError> {
    to_pretty_json(summary)
}
