//! Verification report.

use super::shared::{format_section_heading, to_pretty_json, DOUBLE_RULE, RULE};
use crate::error::ApiError;
use crate::reconcile::{Category, Classification};
use crate::workspace::VerifySummary;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Display switches for the text report.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyView {
    /// List every OK file instead of just the count
    pub show_ok: bool,
    pub color: bool,
}

pub fn format_verify_summary_text(summary: &VerifySummary, view: VerifyView) -> String {
    let classification = &summary.classification;
    let mut out = format_section_heading("VERIFICATION RESULTS SUMMARY", view.color);
    out.push_str(&format!(
        "\n  Total files on disk checked: {}\n  Total unique checksums in DB: {}\n  Database: {}\n",
        summary.files_on_disk,
        summary.fingerprints_in_db,
        summary.database.display()
    ));
    if summary.database_is_empty() {
        out.push_str("  No valid checksums found in database.\n");
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Status", "Count"]);
    for category in Category::ALL {
        table.add_row(vec![
            format!("{} {}", category.symbol(), category.label()),
            classification.count(category).to_string(),
        ]);
    }
    out.push_str(&table.to_string());
    out.push('\n');
    out.push_str(RULE);

    for category in Category::ALL {
        if classification.count(category) == 0 {
            continue;
        }
        let lines = category_lines(classification, category, view.show_ok);
        let heading = format!(
            "{} {} ({}):",
            category.symbol(),
            category.label(),
            classification.count(category)
        );
        out.push_str("\n\n");
        out.push_str(&paint(&heading, category, view.color));
        for line in lines {
            out.push('\n');
            out.push_str(&line);
        }
    }

    if !summary.warnings.is_empty() {
        out.push_str(&format!("\n\nWarnings ({}):", summary.warnings.len()));
        for warning in &summary.warnings {
            out.push_str(&format!("\n  - {}", warning));
        }
    }

    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    let total = classification.discrepancies();
    let verdict = if total == 0 {
        "✓ All files are verified and match the checksum database.".to_string()
    } else {
        format!("⚠ Found {} discrepancies. Review the details above.", total)
    };
    if view.color {
        if total == 0 {
            out.push_str(&verdict.green().to_string());
        } else {
            out.push_str(&verdict.yellow().to_string());
        }
    } else {
        out.push_str(&verdict);
    }
    out.push('\n');
    out.push_str(DOUBLE_RULE);
    out
}

fn category_lines(classification: &Classification, category: Category, show_ok: bool) -> Vec<String> {
    match category {
        Category::Ok if show_ok => classification
            .ok
            .iter()
            .map(|r| format!("  • {}", r.path))
            .collect(),
        Category::Ok => Vec::new(),
        Category::Modified => classification
            .modified
            .iter()
            .map(|r| {
                format!(
                    "  • {}\n    Original: {}\n    Current:  {}",
                    r.path,
                    r.original_fingerprint.short(),
                    r.current_fingerprint.short()
                )
            })
            .collect(),
        Category::Moved => classification
            .moved
            .iter()
            .map(|r| {
                format!(
                    "  • {}\n    Hash: {}\n    Previously at: {}",
                    r.path,
                    r.fingerprint.short(),
                    r.known_old_paths.join(", ")
                )
            })
            .collect(),
        Category::New => classification
            .new
            .iter()
            .map(|r| format!("  • {} (Hash: {})", r.path, r.fingerprint.short()))
            .collect(),
        Category::Deleted => classification
            .deleted
            .iter()
            .map(|r| format!("  • {} (Hash: {})", r.path, r.original_fingerprint.short()))
            .collect(),
        Category::Renamed => classification
            .renamed
            .iter()
            .map(|r| {
                format!(
                    "  • Hash: {}\n    Old path(s): {}\n    New path(s): {}",
                    r.fingerprint.short(),
                    r.old_paths.join(", "),
                    r.new_paths.join(", ")
                )
            })
            .collect(),
    }
}

fn paint(text: &str, category: Category, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match category {
        Category::Ok => text.green().to_string(),
        Category::Modified => text.yellow().to_string(),
        Category::Renamed | Category::Moved => text.blue().to_string(),
        Category::New => text.magenta().to_string(),
        Category::Deleted => text.red().to_string(),
    }
}

pub fn format_verify_summary_json(summary: &VerifySummary) -> Result<String, ApiError> {
    let counts: serde_json::Map<String, serde_json::Value> = Category::ALL
        .iter()
        .map(|c| (c.label().to_string(), summary.classification.count(*c).into()))
        .collect();
    let value = serde_json::json!({
        "database": summary.database,
        "files_on_disk": summary.files_on_disk,
        "fingerprints_in_db": summary.fingerprints_in_db,
        "paths_in_db": summary.paths_in_db,
        "counts": counts,
        "discrepancies": summary.classification.discrepancies(),
        "results": summary.classification,
        "warnings": summary.warnings,
    });
    to_pretty_json(&value)
}
