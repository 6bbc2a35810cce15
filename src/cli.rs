//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to the workspace service.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, touches_workspace};
pub use output::{map_error, CommandOutput, EXIT_CHANGES_DETECTED};
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{
    format_banner, format_ingest_summary_json, format_ingest_summary_text,
    format_section_heading, format_verify_summary_json, format_verify_summary_text, manual_text,
    VerifyView,
};
pub use route::RunContext;
