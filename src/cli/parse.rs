//! CLI parse: clap types for fixity. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// fixity CLI - content-addressable file integrity checker
#[derive(Parser)]
#[command(name = "fixity", version)]
#[command(about = "Detect modified, moved, renamed, new and deleted files")]
pub struct Cli {
    /// Command to run (interactive menu when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable info-level logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Suppress logging and progress bars
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Add files that are not yet in the database
    Add {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Rescan every file and overwrite its checksum
    Regenerate {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Compare the workspace against the database
    Verify {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// List every OK file
        #[arg(long)]
        show_ok: bool,
        /// Exit with status 2 when any discrepancy is found
        #[arg(long)]
        fail_on_change: bool,
    },
    /// Show the manual
    Manual,
    /// Interactive menu
    Menu,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
