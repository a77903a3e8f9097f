//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **label**: Label objects in the terminal view (default)
//! - **status**: Summarize a label file against the dataset
//! - **pairs**: Show which background every object resolves to
//! - **init**: Write a configuration file interactively
//!
//! # Examples
//!
//! ```
//! use pointlabel::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["pointlabel", "label", "--out-json", "labels.json"]);
//! assert!(matches!(cli.get_command(), Commands::Label(_)));
//! ```

use crate::config::{AppConfig, ConfigError};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pointlabel")]
#[command(version, about = "Label extracted point-cloud objects from the keyboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Write debug output to the log file
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

/// Options of the labeling view that override the configuration
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelArgs {
    /// Existing label file to continue from
    #[arg(long = "in-json", value_name = "FILE")]
    pub in_json: Option<PathBuf>,

    /// Where labels are written on save and exit
    #[arg(long = "out-json", value_name = "FILE")]
    pub out_json: Option<PathBuf>,

    /// Load the input labels but start at the first object
    #[arg(long = "no-resume")]
    pub no_resume: bool,
}

impl LabelArgs {
    /// Apply the overrides to a loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(path) = &self.in_json {
            config.data.in_json = Some(path.clone());
        }
        if let Some(path) = &self.out_json {
            config.data.out_json = Some(path.clone());
        }
    }

    /// Resume is on when an input file is known, unless disabled
    #[must_use]
    pub const fn resume(&self, config: &AppConfig) -> bool {
        config.resume() && !self.no_resume
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Label objects interactively (default)
    #[command(visible_alias = "l")]
    Label(LabelArgs),

    /// Show labeling progress and a per-label histogram
    #[command(visible_alias = "st")]
    Status {
        /// Label file (defaults to the configured out_json, then in_json)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },

    /// List every object with the background it resolves to
    Pairs {
        /// Only print objects without a background and matching problems
        #[arg(short = 'w', long = "warnings-only")]
        warnings_only: bool,
    },

    /// Create a configuration file interactively
    Init {
        /// Overwrite an existing configuration
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Label if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Label(LabelArgs::default()))
    }

    /// Path given with `--config`, or the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoDirectory` if there is no `--config` and the
    /// system config directory cannot be determined.
    pub fn config_path(&self) -> Result<PathBuf, ConfigError> {
        self.config
            .clone()
            .map_or_else(AppConfig::config_path, Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_label() {
        let cli = Cli::parse_from(["pointlabel"]);
        assert_eq!(cli.get_command(), Commands::Label(LabelArgs::default()));
        assert!(!cli.quiet);
    }

    #[test]
    fn test_parse_label_overrides() {
        let cli = Cli::parse_from([
            "pointlabel",
            "label",
            "--in-json",
            "old.json",
            "--out-json",
            "new.json",
        ]);
        let Commands::Label(args) = cli.get_command() else {
            panic!("Expected Label command");
        };

        let mut config = AppConfig::new("/fg");
        args.apply(&mut config);
        assert_eq!(config.data.in_json, Some(PathBuf::from("old.json")));
        assert_eq!(config.data.out_json, Some(PathBuf::from("new.json")));
        assert!(args.resume(&config));
    }

    #[test]
    fn test_no_resume() {
        let cli = Cli::parse_from(["pointlabel", "l", "--no-resume"]);
        let Commands::Label(args) = cli.get_command() else {
            panic!("Expected Label command");
        };

        let mut config = AppConfig::new("/fg");
        config.data.in_json = Some(PathBuf::from("old.json"));
        assert!(!args.resume(&config));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pointlabel", "pairs", "-w", "--config", "my.toml", "-v"]);
        assert_eq!(cli.get_command(), Commands::Pairs { warnings_only: true });
        assert_eq!(cli.config_path().unwrap(), PathBuf::from("my.toml"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_status_and_init() {
        let cli = Cli::parse_from(["pointlabel", "status", "labels.json"]);
        assert_eq!(
            cli.get_command(),
            Commands::Status {
                path: Some(PathBuf::from("labels.json"))
            }
        );

        let cli = Cli::parse_from(["pointlabel", "init", "--force"]);
        assert_eq!(cli.get_command(), Commands::Init { force: true });
    }
}
