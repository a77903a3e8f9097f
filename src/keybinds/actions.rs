//! Commands produced by key presses in the labeling view.

use crate::labels::LabelToken;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::KeybindError;

/// Physical keys that can carry a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKey {
    Q,
    W,
    E,
    R,
    T,
}

impl LabelKey {
    /// All label keys in keyboard order
    pub const ALL: [Self; 5] = [Self::Q, Self::W, Self::E, Self::R, Self::T];

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Q => 'q',
            Self::W => 'w',
            Self::E => 'e',
            Self::R => 'r',
            Self::T => 't',
        }
    }

    /// Map a pressed character to a label key, ignoring case
    #[must_use]
    pub fn from_char(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        Self::ALL.into_iter().find(|k| k.as_char() == key)
    }
}

impl fmt::Display for LabelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for LabelKey {
    type Err = KeybindError;

    /// Accepts `q` as well as the long form `q_class`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.split('_').next().unwrap_or_default();
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
        .ok_or_else(|| KeybindError::UnknownKey(s.to_string()))
    }
}

/// Movement through the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// What a key press asks the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCommand {
    /// Move to the previous or next object - a / d
    Navigate(Direction),
    /// Assign a label to the current object - q w e r t
    Label(LabelToken),
    /// Open a map at the current object's location - m
    OpenMap,
    /// Write labels to the output file - s
    Save,
}

impl KeyCommand {
    /// Returns a human-readable description of the command.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Navigate(Direction::Previous) => "Previous object".to_string(),
            Self::Navigate(Direction::Next) => "Next object".to_string(),
            Self::Label(token) => format!("Label as '{token}'"),
            Self::OpenMap => "Open location in map".to_string(),
            Self::Save => "Save labels".to_string(),
        }
    }
}
