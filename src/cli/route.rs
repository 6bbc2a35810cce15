//! CLI route: single route table and run context. Dispatches to the
//! workspace service and presentation.

use crate::cli::help::{command_name, touches_workspace};
use crate::cli::output::{map_error, CommandOutput, EXIT_CHANGES_DETECTED};
use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_banner, format_ingest_summary_json, format_ingest_summary_text,
    format_verify_summary_json, format_verify_summary_text, manual_text, VerifyView,
};
use crate::config::{ConfigLoader, FixityConfig};
use crate::error::ApiError;
use crate::workspace::IntegrityService;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info_span};

const MENU_ITEMS: [&str; 5] = [
    "Add new files to database",
    "Regenerate all checksums",
    "Verify file integrity",
    "Show manual",
    "Exit",
];

/// Runtime context for CLI execution: workspace root and loaded config.
pub struct RunContext {
    workspace_root: PathBuf,
    config: FixityConfig,
    quiet: bool,
    color: bool,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::with_config(workspace_root, config))
    }

    /// Context with an already loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: FixityConfig) -> Self {
        let color = config.logging.color && std::io::stdout().is_terminal();
        Self {
            workspace_root,
            config,
            quiet: false,
            color,
        }
    }

    /// Quiet runs never draw progress bars.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &FixityConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        let span = info_span!("command", name = command_name(command));
        let _enter = span.enter();
        let started = Instant::now();
        let result = match command {
            Commands::Add { format } => self.handle_ingest(false, *format),
            Commands::Regenerate { format } => self.handle_ingest(true, *format),
            Commands::Verify {
                format,
                show_ok,
                fail_on_change,
            } => self.handle_verify(*format, *show_ok, *fail_on_change),
            Commands::Manual => Ok(CommandOutput::success(manual_text(self.color))),
            Commands::Menu => self.run_menu(),
        };
        debug!(
            ok = result.is_ok(),
            workspace = touches_workspace(command),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn service(&self, format: OutputFormat) -> Result<IntegrityService, ApiError> {
        let service = IntegrityService::new(&self.workspace_root, self.config.clone())?;
        if self.quiet || format == OutputFormat::Json {
            Ok(service.without_progress())
        } else {
            Ok(service)
        }
    }

    fn handle_ingest(&self, regenerate: bool, format: OutputFormat) -> Result<CommandOutput, ApiError> {
        let service = self.service(format)?;
        let summary = if regenerate {
            service.regenerate()?
        } else {
            service.add()?
        };
        let text = match format {
            OutputFormat::Json => format_ingest_summary_json(&summary)?,
            OutputFormat::Text => format_ingest_summary_text(&summary, self.color),
        };
        Ok(CommandOutput::success(text))
    }

    fn handle_verify(
        &self,
        format: OutputFormat,
        show_ok: bool,
        fail_on_change: bool,
    ) -> Result<CommandOutput, ApiError> {
        let summary = self.service(format)?.verify()?;
        let text = match format {
            OutputFormat::Json => format_verify_summary_json(&summary)?,
            OutputFormat::Text => format_verify_summary_text(
                &summary,
                VerifyView {
                    show_ok,
                    color: self.color,
                },
            ),
        };
        let output = CommandOutput::success(text);
        if fail_on_change && !summary.classification.is_clean() {
            Ok(output.with_exit_code(EXIT_CHANGES_DETECTED))
        } else {
            Ok(output)
        }
    }

    fn run_menu(&self) -> Result<CommandOutput, ApiError> {
        use dialoguer::Select;

        println!("{}", format_banner(self.color));
        loop {
            let selection = Select::new()
                .with_prompt("Choose an option")
                .items(&MENU_ITEMS)
                .default(0)
                .interact()
                .map_err(|e| ApiError::Interaction(format!("Failed to get user input: {}", e)))?;

            let command = match selection {
                0 => Commands::Add {
                    format: OutputFormat::Text,
                },
                1 => Commands::Regenerate {
                    format: OutputFormat::Text,
                },
                2 => Commands::Verify {
                    format: OutputFormat::Text,
                    show_ok: false,
                    fail_on_change: false,
                },
                3 => Commands::Manual,
                _ => return Ok(CommandOutput::success("Exiting.")),
            };

            match self.execute(&command) {
                Ok(output) => println!("{}\n", output.text),
                Err(e) => eprintln!("{}\n", map_error(&e)),
            }
        }
    }
}
