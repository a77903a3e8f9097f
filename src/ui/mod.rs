//! User interface
//!
//! - [`output`]: user-facing messages, printed for subcommands and buffered
//!   for the status bar of the labeling view
//! - [`viewer`]: the ratatui labeling view driving a [`crate::session::Session`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   main: config → dataset → labels       │
//! └────────────────┬────────────────────────┘
//!                  │ Session
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │   Viewer (terminal, drawing)            │
//! │     └─ ViewerState (keys → session)     │
//! └────────────────┬────────────────────────┘
//!                  │ messages
//!                  ▼
//! ┌───────────────┐  ┌───────────────────┐
//! │ StdoutWriter  │  │ StatusBarWriter   │
//! └───────────────┘  └───────────────────┘
//! ```

mod error;

pub mod output;
pub mod viewer;

pub use error::{Result, UiError};
pub use output::{MessageLevel, OutputWriter, StatusBarWriter, StdoutWriter};
pub use viewer::{Viewer, ViewerState};
