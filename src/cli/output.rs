//! CLI output: rendered command output, exit codes and error mapping.

use crate::error::ApiError;

/// Exit status when verification found discrepancies and the caller asked
/// to fail on change.
pub const EXIT_CHANGES_DETECTED: i32 = 2;

/// Rendered output of one command plus the process exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exit_code: 0,
        }
    }

    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }
}

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::DatabaseMissing(path) => format!(
            "The checksum file '{}' does not exist. Please generate checksums first (fixity regenerate).",
            path.display()
        ),
        ApiError::NothingToScan(root) => format!(
            "No files found to process in '{}' (excluding the database and tool files).",
            root.display()
        ),
        other => other.to_string(),
    }
}
