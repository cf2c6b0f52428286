//! confcell CLI Binary
//!
//! Command-line interface for inspecting and editing confcell store files.

use anyhow::{anyhow, Context};
use clap::Parser;
use confcell::cli::{map_error, Cli, RunContext};
use confcell::logging::{init_logging, LoggingConfig};
use confcell::settings::CliSettings;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let settings =
        CliSettings::load(cli.settings.as_deref()).context("Failed to load settings")?;

    let logging_config = build_logging_config(cli, &settings);
    init_logging(Some(&logging_config)).context("Failed to initialize logging")?;

    info!("confcell starting");

    let context = RunContext::new(&cli.selection(), &settings)
        .map_err(|e| anyhow!(map_error(&e)))
        .context("Failed to build store")?;

    context
        .execute(&cli.command)
        .map_err(|e| anyhow!(map_error(&e)))
}

/// CLI flags override settings, which override defaults.
fn build_logging_config(cli: &Cli, settings: &CliSettings) -> LoggingConfig {
    let mut config = settings.logging.clone();

    if cli.verbose {
        config.level = "debug".to_string();
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
        config.file = file.clone();
    }

    config
}
