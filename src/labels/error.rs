//! Label storage error types
//!
//! Load-time errors (`Read`, `FileFormat`) are fatal for a session because
//! the user asked to resume from that file. `Persistence` is reported by
//! saves during a session and is meant to be surfaced as a warning while the
//! in-memory labels stay authoritative.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by [`LabelStore`](super::LabelStore) operations
#[derive(Debug, Error)]
pub enum LabelError {
    /// The label file exists but could not be read
    #[error("Cannot read label file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// The label file is not a flat JSON object of labels
    #[error("Malformed label file {}: {reason}", path.display())]
    FileFormat { path: PathBuf, reason: String },

    /// The unlabeled sentinel was used as a real label
    #[error("Label {0} is reserved for unlabeled entries")]
    ReservedSentinel(i64),

    /// The key does not belong to the current dataset
    #[error("No dataset entry named '{0}'")]
    UnknownEntry(String),

    /// Writing the label file failed
    #[error("Failed to write labels to {}: {source}", path.display())]
    Persistence { path: PathBuf, source: io::Error },
}

/// Result type for label operations
pub type Result<T> = std::result::Result<T, LabelError>;
