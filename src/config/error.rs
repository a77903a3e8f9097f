//! Configuration error types

use crate::keybinds::KeybindError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, validating or writing configuration.
///
/// All of them are fatal at startup and are reported before any dataset
/// work begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// A value is out of range or inconsistent
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// A platform directory could not be determined
    #[error("Could not determine {0} directory")]
    NoDirectory(&'static str),

    /// The configuration could not be serialized
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The configuration file could not be written
    #[error("Failed to write configuration {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Interactive setup failed
    #[error("Setup aborted: {0}")]
    Setup(String),
}

impl From<KeybindError> for ConfigError {
    fn from(e: KeybindError) -> Self {
        Self::Validation(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
