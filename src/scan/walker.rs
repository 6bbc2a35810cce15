//! Filesystem walker collecting the files a scan should fingerprint

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Walker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false)
    pub follow_symlinks: bool,
    /// File names skipped on exact match
    pub excluded_names: Vec<String>,
    /// File names skipped when they start with any of these
    pub excluded_prefixes: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            excluded_names: vec!["0".to_string()],
            excluded_prefixes: vec!["fixity".to_string()],
            max_depth: None,
        }
    }
}

impl WalkerConfig {
    /// Whether a file with this name is administrative and never scanned.
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.excluded_names.iter().any(|name| name == file_name)
            || self
                .excluded_prefixes
                .iter()
                .any(|prefix| !prefix.is_empty() && file_name.starts_with(prefix.as_str()))
    }
}

/// Files found by a walk plus the entries that could not be read.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub files: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, String)>,
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the tree and collect regular files, sorted by path.
    ///
    /// Unreadable entries are reported in `failures` and do not stop the walk.
    pub fn walk(&self) -> WalkOutcome {
        let mut outcome = WalkOutcome::default();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| p.to_path_buf())
                        .unwrap_or_else(|| self.root.clone());
                    outcome.failures.push((path, e.to_string()));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if self.config.is_excluded(&name) {
                continue;
            }

            outcome.files.push(entry.into_path());
        }

        outcome.files.sort();
        outcome
    }
}
