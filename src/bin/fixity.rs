//! fixity CLI Binary
//!
//! Command-line interface for the fixity integrity database.

use clap::Parser;
use fixity::cli::{map_error, Cli, Commands, RunContext};
use fixity::config::{ConfigLoader, FixityConfig};
use fixity::error::ApiError;
use fixity::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let loaded = load_config(&cli);
    let base_logging = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    let logging_config = build_logging_config(&cli, base_logging);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("fixity starting");

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let context = RunContext::with_config(cli.workspace.clone(), config).quiet(cli.quiet);
    let command = cli.command.clone().unwrap_or(Commands::Menu);

    match context.execute(&command) {
        Ok(output) => {
            info!(exit_code = output.exit_code, "Command completed");
            println!("{}", output.text);
            if output.exit_code != 0 {
                process::exit(output.exit_code);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> Result<FixityConfig, ApiError> {
    if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
    } else {
        ConfigLoader::load(&cli.workspace)
    }
}

/// Fold CLI flags over the configured logging settings (CLI wins).
fn build_logging_config(cli: &Cli, mut config: LoggingConfig) -> LoggingConfig {
    if cli.quiet {
        config.level = "off".to_string();
        return config;
    }
    if cli.verbose {
        config.level = "info".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }
    config
}
