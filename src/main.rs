//! Pointlabel CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # First run: describe the dataset
//! pointlabel init
//!
//! # Label objects (default command)
//! pointlabel
//! pointlabel label --in-json labels.json --out-json labels.json
//!
//! # Check which background every object resolves to
//! pointlabel pairs --warnings-only
//!
//! # Progress of a label file
//! pointlabel status labels.json
//! ```
//!
//! # Configuration
//!
//! Read from `--config FILE` or `~/.config/pointlabel/config.toml` on Linux.
//! When neither exists the setup wizard runs first.

use pointlabel::{
    Result,
    cli::{Cli, Commands},
    commands,
    config::{self, AppConfig},
    logging,
    ui::{OutputWriter, StdoutWriter},
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let output = if cli.quiet {
        StdoutWriter::quiet()
    } else {
        StdoutWriter::new()
    };

    let _guard = match logging::init(&config::log_dir(), cli.verbose) {
        Ok(guard) => Some(guard),
        Err(e) => {
            output.warning(&format!("Logging disabled: {e}"));
            None
        }
    };

    match run(&cli, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            output.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, output: &StdoutWriter) -> Result<()> {
    let config_path = cli.config_path()?;

    let load_config = || -> Result<AppConfig> {
        if cli.config.is_none() && !config_path.exists() {
            output.info("No configuration found, starting setup");
            return Ok(config::first_time_setup(&config_path)?);
        }
        Ok(AppConfig::load(&config_path)?)
    };

    match cli.get_command() {
        Commands::Init { force } => commands::init(&config_path, force, output),
        Commands::Label(args) => commands::label(&load_config()?, &args, output),
        Commands::Status { path } => commands::status(&load_config()?, path.as_deref(), output),
        Commands::Pairs { warnings_only } => commands::pairs(&load_config()?, warnings_only, output),
    }
}
