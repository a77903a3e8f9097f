use thiserror::Error;

/// Problems in the configured key-to-label mapping
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeybindError {
    /// Key outside the label key set
    #[error("Unknown label key '{0}' (expected one of q, w, e, r, t)")]
    UnknownKey(String),

    /// The same physical key was configured twice (e.g. `q` and `q_class`)
    #[error("Label key '{0}' is bound more than once")]
    DuplicateKey(char),

    /// More bindings than label keys
    #[error("Too many label bindings: {provided} (max {max})")]
    TooManyBindings { provided: usize, max: usize },

    /// The unlabeled sentinel was configured as a label
    #[error("Key '{0}' is bound to -100, which is reserved for unlabeled objects")]
    ReservedLabel(char),
}
