//! Map lookup error types

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("Unsupported projection '{0}', expected EPSG:4326, EPSG:326NN or EPSG:327NN")]
    UnsupportedProjection(String),

    #[error("No projection configured; set data.projection to enable map lookup")]
    NoProjection,

    #[error("Failed to open browser: {0}")]
    Open(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, MapError>;
