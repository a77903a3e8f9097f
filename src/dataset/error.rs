//! Dataset discovery error types
//!
//! `RootNotFound` and `Empty` abort dataset construction. The pairing
//! variants (`BackgroundMatch`, `NoObjectGroup`) never do: they are collected
//! on the built [`DatasetIndex`](super::DatasetIndex) as warnings and the
//! affected entries are shown without a background.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    /// The foreground root is missing or not a directory
    #[error("Point cloud root {} does not exist or is not a directory", root.display())]
    RootNotFound { root: PathBuf },

    /// No foreground files were discovered
    #[error("No point cloud files (.las/.laz) found under {}", root.display())]
    Empty { root: PathBuf },

    /// Zero or several background files match an object group
    #[error(
        "Background for object group '{group}' in {}: expected exactly one match, found {}",
        directory.display(),
        candidates.len()
    )]
    BackgroundMatch {
        group: String,
        directory: PathBuf,
        candidates: Vec<PathBuf>,
    },

    /// A foreground file sits directly in the root, outside any object group
    #[error("'{path}' is not inside an object group directory, no background can be matched")]
    NoObjectGroup { path: String },
}

impl DatasetError {
    /// Whether this error only degrades entries instead of aborting the build
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::BackgroundMatch { .. } | Self::NoObjectGroup { .. })
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;
