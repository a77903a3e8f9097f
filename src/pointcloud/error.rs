//! Point-cloud header error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reading a LAS/LAZ public header.
///
/// These are per-object problems; the viewer reports them and keeps going.
#[derive(Debug, Error)]
pub enum PointCloudError {
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{} is not a LAS/LAZ file", path.display())]
    NotLas { path: PathBuf },

    #[error("{} has a truncated header ({len} bytes)", path.display())]
    Truncated { path: PathBuf, len: usize },

    #[error("{} uses unsupported LAS version {major}.{minor}", path.display())]
    UnsupportedVersion { path: PathBuf, major: u8, minor: u8 },
}

pub type Result<T> = std::result::Result<T, PointCloudError>;
