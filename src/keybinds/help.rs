//! Help text shown next to the view

use super::actions::{Direction, KeyCommand};
use super::config::KeyBindingTable;

/// One line per bound label key, e.g. `q: bad`
#[must_use]
pub fn class_guide(table: &KeyBindingTable) -> Vec<String> {
    table
        .bindings()
        .map(|(key, token)| format!("{key}: {token}"))
        .collect()
}

/// Fixed navigation and action keys
#[must_use]
pub fn key_reference() -> Vec<(&'static str, String)> {
    vec![
        ("a / ←", KeyCommand::Navigate(Direction::Previous).description()),
        ("d / →", KeyCommand::Navigate(Direction::Next).description()),
        ("m", KeyCommand::OpenMap.description()),
        ("s", KeyCommand::Save.description()),
        ("Esc", "Quit".to_string()),
    ]
}
