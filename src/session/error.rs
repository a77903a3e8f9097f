use thiserror::Error;

/// Errors that can occur while labeling
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Label error: {0}")]
    Label(#[from] crate::labels::LabelError),
}

/// Session result type
pub type Result<T> = std::result::Result<T, SessionError>;
