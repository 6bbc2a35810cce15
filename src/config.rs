//! Configuration System
//!
//! Layered configuration: built-in defaults, the global file under the XDG
//! config directory, the workspace `.fixity.toml`, then `FIXITY__*`
//! environment variables.

use crate::logging::LoggingConfig;
use crate::scan::walker::WalkerConfig;
use crate::store::persistence::DEFAULT_COMPRESSION_LEVEL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Default name of the snapshot database inside the workspace.
pub const DEFAULT_DATABASE_FILE: &str = "checksums.json.gz";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixityConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Snapshot database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// File name of the database, relative to the workspace root
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// gzip level, 0-9
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,
}

fn default_file_name() -> String {
    DEFAULT_DATABASE_FILE.to_string()
}

fn default_compression_level() -> u32 {
    DEFAULT_COMPRESSION_LEVEL
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            compression_level: default_compression_level(),
        }
    }
}

impl DatabaseConfig {
    /// Absolute location of the database for `workspace_root`.
    pub fn path_in(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(&self.file_name)
    }
}

/// Directory scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File names never scanned
    #[serde(default = "default_excluded_names")]
    pub excluded_names: Vec<String>,

    /// File name prefixes never scanned (the tool's own binaries by default)
    #[serde(default = "default_excluded_prefixes")]
    pub excluded_prefixes: Vec<String>,

    #[serde(default)]
    pub follow_symlinks: bool,

    /// Draw progress bars on the terminal
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

fn default_excluded_names() -> Vec<String> {
    vec!["0".to_string()]
}

fn default_excluded_prefixes() -> Vec<String> {
    vec!["fixity".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            excluded_names: default_excluded_names(),
            excluded_prefixes: default_excluded_prefixes(),
            follow_symlinks: false,
            show_progress: default_true(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Database(String),
    Scan(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Database(msg) => write!(f, "Database: {}", msg),
            ValidationError::Scan(msg) => write!(f, "Scan: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl FixityConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let name = self.database.file_name.trim();
        if name.is_empty() {
            errors.push(ValidationError::Database(
                "file_name cannot be empty".to_string(),
            ));
        } else if name.contains('/') || name.contains('\\') {
            errors.push(ValidationError::Database(format!(
                "file_name '{}' must be a plain file name",
                name
            )));
        }
        if self.database.compression_level > 9 {
            errors.push(ValidationError::Database(format!(
                "compression_level {} is outside 0-9",
                self.database.compression_level
            )));
        }

        if self.scan.excluded_names.iter().any(|n| n.is_empty()) {
            errors.push(ValidationError::Scan(
                "excluded_names cannot contain empty entries".to_string(),
            ));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Walker settings for a scan. The database file is always excluded.
    pub fn walker_config(&self) -> WalkerConfig {
        let mut excluded_names = self.scan.excluded_names.clone();
        if !excluded_names.contains(&self.database.file_name) {
            excluded_names.push(self.database.file_name.clone());
        }
        let temp_name = format!("{}.tmp", self.database.file_name);
        if !excluded_names.contains(&temp_name) {
            excluded_names.push(temp_name);
        }
        WalkerConfig {
            follow_symlinks: self.scan.follow_symlinks,
            excluded_names,
            excluded_prefixes: self.scan.excluded_prefixes.clone(),
            max_depth: None,
        }
    }
}
