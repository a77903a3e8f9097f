//! Pointlabel - keyboard-driven labeling of extracted point-cloud objects
//!
//! Objects cut out of larger scans live in a foreground tree
//! (`<chain>/<group>/<object>.laz`); their parent scans live in a background
//! tree (`<chain>/<group>.laz`). Pointlabel pairs the two, walks through the
//! objects one by one and records one label per object in a flat JSON file,
//! autosaving after every assignment.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod keybinds;
pub mod labels;
pub mod logging;
pub mod map;
pub mod pointcloud;
pub mod session;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum PointlabelError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] dataset::DatasetError),

    #[error("Label error: {0}")]
    Label(#[from] labels::LabelError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] session::SessionError),

    #[error("Point cloud error: {0}")]
    PointCloud(#[from] pointcloud::PointCloudError),

    #[error("Map error: {0}")]
    Map(#[from] map::MapError),

    #[error("UI error: {0}")]
    Ui(#[from] ui::UiError),

    #[error("Logging error: {0}")]
    Logging(#[from] logging::LoggingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PointlabelError>;
