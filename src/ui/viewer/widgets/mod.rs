//! Ratatui widgets for the labeling view

mod class_guide;
mod help_bar;
mod object_panel;
mod status_bar;

pub use class_guide::ClassGuide;
pub use help_bar::{HelpBar, KeyHint};
pub use object_panel::ObjectPanel;
pub use status_bar::StatusBar;
