//! View state between frames
//!
//! Holds the status messages and the header summary of the object on screen,
//! and turns [`ViewerEvent`]s into session calls. Nothing in here touches the
//! terminal, so the whole key flow can be exercised in tests.

use super::events::ViewerEvent;
use crate::dataset::DatasetEntry;
use crate::keybinds::Direction;
use crate::map::{self, MapError, Projection};
use crate::pointcloud::LasHeader;
use crate::session::{KeyOutcome, Session};
use crate::ui::error::Result;
use crate::ui::output::{OutputWriter, StatusBarWriter};
use std::path::PathBuf;

/// Whether the event loop keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Header summaries for the object at `index`
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    pub index: usize,
    pub foreground: std::result::Result<LasHeader, String>,
    /// `None` when the object has no background
    pub background: Option<std::result::Result<LasHeader, String>>,
}

impl ObjectInfo {
    fn load(index: usize, entry: &DatasetEntry) -> Self {
        let read = |path: &std::path::Path| LasHeader::read(path).map_err(|e| e.to_string());
        Self {
            index,
            foreground: read(entry.foreground_path.as_path()),
            background: entry.background_absolute_path.as_deref().map(read),
        }
    }
}

pub struct ViewerState {
    pub status: StatusBarWriter,
    output: Option<PathBuf>,
    projection: Option<Projection>,
    info: Option<ObjectInfo>,
}

impl ViewerState {
    /// `output` is used by the save key; `projection` by the map key
    #[must_use]
    pub fn new(output: Option<PathBuf>, projection: Option<Projection>) -> Self {
        Self {
            status: StatusBarWriter::new(),
            output,
            projection,
            info: None,
        }
    }

    /// Header summary of the current object, read once per cursor move
    pub fn object_info(&mut self, session: &Session<'_>) -> &ObjectInfo {
        let current = session.current();
        let stale = self.info.as_ref().is_none_or(|info| info.index != current.index);

        if stale {
            let info = ObjectInfo::load(current.index, current.entry);
            if let Err(e) = &info.foreground {
                tracing::warn!("foreground header: {e}");
                self.status.warning(e);
            }
            if let Some(Err(e)) = &info.background {
                tracing::warn!("background header: {e}");
                self.status.warning(e);
            }
            self.info = Some(info);
        }

        self.info.get_or_insert_with(|| ObjectInfo::load(current.index, current.entry))
    }

    /// Apply one event to the session
    ///
    /// # Errors
    ///
    /// Returns `UiError::Session` if the session rejects a label.
    pub fn handle(&mut self, session: &mut Session<'_>, event: ViewerEvent) -> Result<Flow> {
        match event {
            ViewerEvent::Quit => return Ok(Flow::Quit),
            ViewerEvent::Navigate(direction) => {
                let moved = session.navigate(direction);
                self.report_move(moved, direction);
            }
            ViewerEvent::Key(c) => match session.handle_key(c)? {
                KeyOutcome::Ignored => {}
                KeyOutcome::Navigated { moved } => {
                    let direction = if c.eq_ignore_ascii_case(&'a') {
                        Direction::Previous
                    } else {
                        Direction::Next
                    };
                    self.report_move(moved, direction);
                }
                KeyOutcome::Labeled(assignment) => {
                    let key = session
                        .dataset()
                        .get(assignment.index)
                        .map_or("", |entry| entry.foreground_relative_path.as_str());
                    self.status.success(&format!("{key} = {}", assignment.label));
                    if let Some(e) = assignment.autosave_error {
                        self.status.warning(&format!(
                            "Autosave failed, labels are only in memory: {e}"
                        ));
                    }
                }
                KeyOutcome::OpenMap => self.open_map(session),
                KeyOutcome::Save => self.save(session),
            },
            ViewerEvent::Resize | ViewerEvent::Ignored => {}
        }
        Ok(Flow::Continue)
    }

    fn report_move(&self, moved: bool, direction: Direction) {
        if !moved {
            self.status.info(match direction {
                Direction::Previous => "Already at the first object",
                Direction::Next => "Already at the last object",
            });
        }
    }

    fn open_map(&mut self, session: &Session<'_>) {
        let center = self
            .object_info(session)
            .foreground
            .as_ref()
            .map(LasHeader::center_xy)
            .map_err(Clone::clone);
        let (x, y) = match center {
            Ok(center) => center,
            Err(e) => {
                self.status.warning(&format!("Cannot locate object: {e}"));
                return;
            }
        };

        match map::open_location(self.projection, x, y) {
            Ok(url) => self.status.info(&format!("Opened {url}")),
            Err(e @ MapError::NoProjection) => self.status.warning(&e.to_string()),
            Err(e) => self.status.error(&e.to_string()),
        }
    }

    fn save(&self, session: &Session<'_>) {
        match session.persist(self.output.as_deref()) {
            Ok(path) => self.status.success(&format!(
                "Saved {} labels to {}",
                session.labels().labeled_count(),
                path.display()
            )),
            Err(e) => {
                tracing::warn!("save failed: {e}");
                self.status.error(&format!("Save failed: {e}"));
            }
        }
    }
}
