//! UI error types

use crate::session::SessionError;
use thiserror::Error;

/// Errors that end the labeling view
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal setup, drawing or event polling failed
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The session rejected an operation
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
