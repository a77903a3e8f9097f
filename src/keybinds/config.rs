//! Key binding table built from the labeling configuration.

use super::actions::{Direction, KeyCommand, LabelKey};
use super::error::KeybindError;
use crate::labels::LabelToken;
use std::collections::BTreeMap;

/// Immutable mapping from label keys to label tokens.
///
/// Navigation and action keys are fixed; only label keys are configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindingTable {
    labels: BTreeMap<LabelKey, LabelToken>,
}

impl KeyBindingTable {
    /// Build the table from the configured `classification_keymapping`.
    ///
    /// Keys may be written as `q` or `q_class`. Two labels may share a token,
    /// but each physical key can be bound only once.
    ///
    /// # Errors
    ///
    /// Returns a `KeybindError` for unknown keys, keys bound twice, more than
    /// five bindings, or a binding to the reserved `-100`.
    pub fn build(mapping: &BTreeMap<String, LabelToken>) -> Result<Self, KeybindError> {
        if mapping.len() > LabelKey::ALL.len() {
            return Err(KeybindError::TooManyBindings {
                provided: mapping.len(),
                max: LabelKey::ALL.len(),
            });
        }

        let mut labels = BTreeMap::new();
        for (name, token) in mapping {
            let key: LabelKey = name.parse()?;
            if token.is_reserved() {
                return Err(KeybindError::ReservedLabel(key.as_char()));
            }
            if labels.insert(key, token.clone()).is_some() {
                return Err(KeybindError::DuplicateKey(key.as_char()));
            }
        }

        Ok(Self { labels })
    }

    /// Label bound to a pressed key, if any
    #[must_use]
    pub fn resolve(&self, key: char) -> Option<&LabelToken> {
        LabelKey::from_char(key).and_then(|k| self.labels.get(&k))
    }

    /// Full command for a pressed key
    #[must_use]
    pub fn command(&self, key: char) -> Option<KeyCommand> {
        if let Some(token) = self.resolve(key) {
            return Some(KeyCommand::Label(token.clone()));
        }
        match key.to_ascii_lowercase() {
            'a' => Some(KeyCommand::Navigate(Direction::Previous)),
            'd' => Some(KeyCommand::Navigate(Direction::Next)),
            'm' => Some(KeyCommand::OpenMap),
            's' => Some(KeyCommand::Save),
            _ => None,
        }
    }

    /// Bound keys with their labels, in keyboard order
    pub fn bindings(&self) -> impl Iterator<Item = (LabelKey, &LabelToken)> {
        LabelKey::ALL
            .into_iter()
            .filter_map(|k| self.labels.get(&k).map(|token| (k, token)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for KeyBindingTable {
    fn default() -> Self {
        Self {
            labels: default_keymapping()
                .into_iter()
                .filter_map(|(name, token)| name.parse().ok().map(|key| (key, token)))
                .collect(),
        }
    }
}

/// The five default classes
#[must_use]
pub fn default_keymapping() -> BTreeMap<String, LabelToken> {
    [
        ("q", "bad"),
        ("w", "multiple"),
        ("e", "ok"),
        ("r", "good"),
        ("t", "ignore"),
    ]
    .into_iter()
    .map(|(key, label)| (key.to_string(), LabelToken::from(label)))
    .collect()
}
