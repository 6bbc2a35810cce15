//! Built-in manual.

use super::shared::{format_section_heading, DOUBLE_RULE, RULE};
use crate::config::{DEFAULT_DATABASE_FILE, WORKSPACE_CONFIG_FILE};

pub fn manual_text(color: bool) -> String {
    let mut out = format_section_heading("FIXITY MANUAL", color);
    out.push_str(&format!(
        r#"

OVERVIEW:
fixity keeps a content-addressable checksum database for a directory tree.
It detects modified, moved, renamed, new and deleted files.

HOW IT WORKS:
  • Files are scanned recursively from the workspace root
  • Each file's content is fingerprinted (128-bit BLAKE3)
  • Fingerprints are stored in a compressed database ({db})
  • Several paths can share one fingerprint, each with its own timestamps

{rule}
COMMANDS:
{rule}

fixity add
   → Records files that are not yet in the database
   → Does NOT update existing records; changed files stay MODIFIED
   → Prunes records of files that no longer exist

fixity regenerate
   → Rescans every file and rebinds it to its current content
   → Use after intentional changes to create a fresh baseline
   → WARNING: overwrites existing checksums

fixity verify [--format text|json] [--show-ok] [--fail-on-change]
   → Compares the workspace against the database
   → Reports: OK, MODIFIED, RENAMED, MOVED, NEW, DELETED
   → --fail-on-change exits with status 2 when anything differs

fixity manual
   → Displays this help

fixity menu (or no command)
   → Interactive menu

{rule}
TYPICAL WORKFLOW:
{rule}
1. First time: `fixity regenerate` to create the database
2. New files: `fixity add`
3. Integrity check: `fixity verify`
4. After intentional changes: `fixity regenerate`

{rule}
NOTES:
{rule}
  • Database file: {db} (gzip-compressed JSON)
  • Excluded files: the database itself and names starting with "fixity"
  • Per-workspace settings: {cfg}
  • The database is portable and can be copied or backed up
{double}"#,
        db = DEFAULT_DATABASE_FILE,
        cfg = WORKSPACE_CONFIG_FILE,
        rule = RULE,
        double = DOUBLE_RULE,
    ));
    out
}
