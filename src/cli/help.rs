//! CLI command-name contract for logging spans and routing.

use crate::cli::parse::Commands;

/// Command name string used in log spans (e.g. "verify").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Add { .. } => "add",
        Commands::Regenerate { .. } => "regenerate",
        Commands::Verify { .. } => "verify",
        Commands::Manual => "manual",
        Commands::Menu => "menu",
    }
}

/// Commands that read the workspace.
pub fn touches_workspace(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Add { .. } | Commands::Regenerate { .. } | Commands::Verify { .. }
    )
}
