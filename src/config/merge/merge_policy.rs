//! Merge rules: defaults, override order, conflict handling.

use crate::config::DEFAULT_DATABASE_FILE;
use crate::store::persistence::DEFAULT_COMPRESSION_LEVEL;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Prefix of configuration environment variables (`FIXITY__DATABASE__FILE_NAME`).
pub const ENV_PREFIX: &str = "FIXITY";

/// Separator between the prefix and nested keys.
pub const ENV_SEPARATOR: &str = "__";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("database.file_name", DEFAULT_DATABASE_FILE)?
        .set_default("database.compression_level", DEFAULT_COMPRESSION_LEVEL as i64)?
        .set_default("scan.follow_symlinks", false)?
        .set_default("scan.show_progress", true)
}

/// Environment layer, applied last so it wins over every file.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}
