//! Labeling session
//!
//! The session owns the label record and a cursor into the dataset. The
//! viewer layer only ever calls [`Session::current`], [`Session::navigate`],
//! [`Session::assign`] (or [`Session::handle_key`], which dispatches to them)
//! and [`Session::persist`].
//!
//! # Workflow
//!
//! ```text
//! DatasetIndex::build ──┐
//! LabelStore::load ─────┼─→ LabelStore::reconcile ─→ Session::initialize
//! KeyBindingTable ──────┘                                   │
//!                                   ┌───────────────────────┘
//!                                   ▼
//!                       ┌─→ current() → viewer draws
//!                       │   key press → handle_key()
//!                       │     ├─ a/d     → navigate()
//!                       │     ├─ q..t    → assign() → set + autosave (+ next)
//!                       │     └─ m/s     → returned to the viewer
//!                       └────────┘
//! ```

mod error;

pub use error::{Result, SessionError};

use crate::dataset::{DatasetEntry, DatasetIndex};
use crate::keybinds::{Direction, KeyBindingTable, KeyCommand};
use crate::labels::{LabelError, LabelStore, LabelToken, LabelValue};
use std::path::{Path, PathBuf};

/// Output used by [`Session::persist`] when none is configured
pub const DEFAULT_OUTPUT: &str = "tmp/unnamed_label.json";

const UNLABELED_VALUE: LabelValue = LabelValue::Unlabeled;

/// Behavior switches for a session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Advance to the next object after a label is assigned
    pub next_on_label: bool,
    /// Where every assignment is autosaved
    pub autosave_path: PathBuf,
}

/// Read-only view of the current object
#[derive(Debug, Clone, Copy)]
pub struct CurrentItem<'s> {
    pub index: usize,
    pub entry: &'s DatasetEntry,
    pub label: &'s LabelValue,
}

/// Cursor position for display; positions are 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
    pub group_position: usize,
    pub group_len: usize,
    pub labeled: usize,
}

/// Result of a label assignment
#[derive(Debug)]
pub struct Assignment {
    /// Index of the labeled object
    pub index: usize,
    pub label: LabelToken,
    /// Whether the cursor moved on afterwards
    pub advanced: bool,
    /// Set when the autosave failed; the label is still held in memory
    pub autosave_error: Option<LabelError>,
}

/// What a key press did
#[derive(Debug)]
pub enum KeyOutcome {
    /// Unbound key
    Ignored,
    /// Navigation request; `moved` is false at the dataset boundary
    Navigated { moved: bool },
    Labeled(Assignment),
    /// Needs the viewer: open the map for the current object
    OpenMap,
    /// Needs the viewer: persist to the configured output
    Save,
}

/// Navigable labeling session over a dataset
pub struct Session<'a> {
    dataset: &'a DatasetIndex,
    keys: &'a KeyBindingTable,
    labels: LabelStore,
    cursor: usize,
    options: SessionOptions,
}

impl<'a> Session<'a> {
    /// Create a session.
    ///
    /// With `resume`, the cursor starts on the first unlabeled object in
    /// dataset order, or on the first object if everything is labeled.
    /// Otherwise it starts on the first object.
    #[must_use]
    pub fn initialize(
        dataset: &'a DatasetIndex,
        keys: &'a KeyBindingTable,
        labels: LabelStore,
        options: SessionOptions,
        resume: bool,
    ) -> Self {
        let cursor = if resume {
            first_unlabeled(dataset, &labels).unwrap_or(0)
        } else {
            0
        };

        tracing::info!(
            entries = dataset.len(),
            labeled = labels.labeled_count(),
            cursor,
            resume,
            "session initialized"
        );

        Self {
            dataset,
            keys,
            labels,
            cursor,
            options,
        }
    }

    /// The object to display and its label
    #[must_use]
    pub fn current(&self) -> CurrentItem<'_> {
        let entry = &self.dataset.entries()[self.cursor];
        let label = self
            .labels
            .get(entry.foreground_relative_path.as_str())
            .unwrap_or(&UNLABELED_VALUE);
        CurrentItem {
            index: self.cursor,
            entry,
            label,
        }
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    /// Always `false`; a session needs at least one object
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    #[must_use]
    pub const fn dataset(&self) -> &'a DatasetIndex {
        self.dataset
    }

    #[must_use]
    pub const fn labels(&self) -> &LabelStore {
        &self.labels
    }

    #[must_use]
    pub const fn options(&self) -> &SessionOptions {
        &self.options
    }

    #[must_use]
    pub const fn keys(&self) -> &KeyBindingTable {
        self.keys
    }

    /// Give up the session and keep its labels
    #[must_use]
    pub fn into_labels(self) -> LabelStore {
        self.labels
    }

    /// Move one object back or forth.
    ///
    /// Stops at both ends of the dataset; returns whether the cursor moved.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let last = self.dataset.len().saturating_sub(1);
        let target = match direction {
            Direction::Previous => self.cursor.saturating_sub(1),
            Direction::Next => (self.cursor + 1).min(last),
        };
        let moved = target != self.cursor;
        self.cursor = target;
        if moved {
            tracing::debug!(cursor = self.cursor, "moved");
        }
        moved
    }

    /// Label the current object with the token bound to `key`.
    ///
    /// Unbound keys are ignored (`Ok(None)`). After the label is set the
    /// record is autosaved; a failed autosave is reported in the returned
    /// [`Assignment`] and does not undo the label. With `next_on_label` the
    /// cursor then advances, except on the last object.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Label` if the store rejects the label.
    pub fn assign(&mut self, key: char) -> Result<Option<Assignment>> {
        let Some(token) = self.keys.resolve(key).cloned() else {
            return Ok(None);
        };
        self.label_current(token).map(Some)
    }

    /// Resolve a key press and apply it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Label` if a label assignment is rejected.
    pub fn handle_key(&mut self, key: char) -> Result<KeyOutcome> {
        let Some(command) = self.keys.command(key) else {
            return Ok(KeyOutcome::Ignored);
        };

        Ok(match command {
            KeyCommand::Navigate(direction) => KeyOutcome::Navigated {
                moved: self.navigate(direction),
            },
            KeyCommand::Label(token) => KeyOutcome::Labeled(self.label_current(token)?),
            KeyCommand::OpenMap => KeyOutcome::OpenMap,
            KeyCommand::Save => KeyOutcome::Save,
        })
    }

    /// Save labels to `output`, or to [`DEFAULT_OUTPUT`] when `None`.
    ///
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::Persistence` if the write fails.
    pub fn persist(&self, output: Option<&Path>) -> std::result::Result<PathBuf, LabelError> {
        let path = output.map_or_else(|| PathBuf::from(DEFAULT_OUTPUT), Path::to_path_buf);
        self.labels.save(&path)?;
        tracing::info!(path = %path.display(), labeled = self.labels.labeled_count(), "saved labels");
        Ok(path)
    }

    /// Cursor and labeling progress
    #[must_use]
    pub fn progress(&self) -> Progress {
        let (group_position, group_len) = self.dataset.group_position(self.cursor).unwrap_or((1, 1));
        Progress {
            position: self.cursor + 1,
            total: self.dataset.len(),
            group_position,
            group_len,
            labeled: self.labels.labeled_count(),
        }
    }

    /// Title line: current label and position inside group and dataset
    #[must_use]
    pub fn title(&self) -> String {
        let progress = self.progress();
        format!(
            "class: {} -- CURRENT SCENE: {}/{} -- TOTAL: {}/{}",
            self.current().label,
            progress.group_position,
            progress.group_len,
            progress.position,
            progress.total
        )
    }

    fn label_current(&mut self, token: LabelToken) -> Result<Assignment> {
        let index = self.cursor;
        let key = self.dataset.entries()[index]
            .foreground_relative_path
            .as_str()
            .to_string();
        self.labels.set(&key, token.clone())?;

        let autosave_error = self.labels.autosave(&self.options.autosave_path).err();
        if let Some(e) = &autosave_error {
            tracing::warn!("autosave failed, labels are only held in memory: {e}");
        }

        let advanced = self.options.next_on_label && self.navigate(Direction::Next);

        Ok(Assignment {
            index,
            label: token,
            advanced,
            autosave_error,
        })
    }
}

fn first_unlabeled(dataset: &DatasetIndex, labels: &LabelStore) -> Option<usize> {
    dataset
        .keys()
        .position(|key| labels.get(key).is_none_or(LabelValue::is_unlabeled))
}
