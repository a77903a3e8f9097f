//! Keyboard handling for the labeling view
//!
//! Terminal events are reduced to a few [`ViewerEvent`]s; plain characters are
//! passed to the session untouched so the configured label keys stay in one
//! place.

use crate::keybinds::Direction;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// What the view should do after a terminal event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Character key, resolved by the session
    Key(char),
    /// Arrow keys
    Navigate(Direction),
    /// Esc or Ctrl-C
    Quit,
    /// Terminal resized; redraw
    Resize,
    Ignored,
}

/// Map a key press to a viewer event
#[must_use]
pub fn map_key(key: KeyEvent) -> ViewerEvent {
    if key.kind == KeyEventKind::Release {
        return ViewerEvent::Ignored;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => ViewerEvent::Quit,
        (KeyCode::Left, _) => ViewerEvent::Navigate(Direction::Previous),
        (KeyCode::Right, _) => ViewerEvent::Navigate(Direction::Next),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => ViewerEvent::Key(c),
        _ => ViewerEvent::Ignored,
    }
}

/// Wait up to `timeout` for the next event
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_event(timeout: Duration) -> std::io::Result<ViewerEvent> {
    if !event::poll(timeout)? {
        return Ok(ViewerEvent::Ignored);
    }

    Ok(match event::read()? {
        Event::Key(key) => map_key(key),
        Event::Resize(_, _) => ViewerEvent::Resize,
        _ => ViewerEvent::Ignored,
    })
}
