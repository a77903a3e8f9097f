//! Keyboard shortcuts for the labeling view.
//!
//! Up to five label keys (`q w e r t`) are configurable; navigation and the
//! remaining actions use fixed keys.

pub mod actions;
pub mod config;
pub mod error;
pub mod help;

pub use actions::{Direction, KeyCommand, LabelKey};
pub use config::{KeyBindingTable, default_keymapping};
pub use error::KeybindError;
