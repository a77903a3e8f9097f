//! Terminal labeling view
//!
//! ```text
//! ┌ class: bad -- CURRENT SCENE: 2/7 -- TOTAL: 12/140 ─────────────┐
//! ├ Object ─────────────────────────────────┬ Classes ─────────────┤
//! │ object      s1/city/02.laz              │ q: bad               │
//! │     LAS 1.2 | 5210 points | ...         │ w: multiple          │
//! │ background  /data/bg/s1/city.laz        │ ...                  │
//! ├ Status ─────────────────────────────────┴──────────────────────┤
//! │ ✓ s1/city/01.laz = bad                       labeled 11/140    │
//! └────────────────────────────────────────────────────────────────┘
//!  a / ←:Previous object  d / →:Next object  m:Open location in map
//! ```
//!
//! The view owns the terminal only; every state change goes through
//! [`Session`].

mod events;
mod state;
mod theme;
pub mod widgets;

pub use events::{ViewerEvent, map_key};
pub use state::{Flow, ObjectInfo, ViewerState};
pub use theme::Theme;

use crate::config::ViewerStyle;
use crate::session::Session;
use crate::ui::error::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use std::io::{self, Stdout};
use std::time::Duration;
use widgets::{ClassGuide, HelpBar, KeyHint, ObjectPanel, StatusBar};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Ratatui front end for a labeling session
pub struct Viewer {
    style: ViewerStyle,
    theme: Theme,
    hints: Vec<KeyHint>,
}

impl Viewer {
    #[must_use]
    pub fn new(style: ViewerStyle) -> Self {
        Self {
            style,
            theme: Theme::default(),
            hints: HelpBar::default_hints(),
        }
    }

    /// Run the view until the user quits.
    ///
    /// The terminal is restored even when the loop fails.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Terminal` on terminal failures and
    /// `UiError::Session` if the session rejects a label.
    pub fn run(&self, session: &mut Session<'_>, state: &mut ViewerState) -> Result<()> {
        let mut terminal = Self::setup_terminal()?;

        let result = self.run_loop(&mut terminal, session, state);

        if let Err(e) = Self::cleanup_terminal() {
            tracing::error!("terminal cleanup failed: {e}");
            eprintln!("Warning: terminal cleanup failed: {e}");
        }

        result
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    fn run_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        session: &mut Session<'_>,
        state: &mut ViewerState,
    ) -> Result<()> {
        loop {
            state.object_info(session);
            terminal.draw(|frame| self.render(frame, session, state))?;

            let event = events::poll_event(POLL_INTERVAL)?;
            if state.handle(session, event)? == Flow::Quit {
                tracing::info!(cursor = session.cursor(), "viewer closed");
                return Ok(());
            }
        }
    }

    fn render(&self, frame: &mut Frame, session: &Session<'_>, state: &mut ViewerState) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(6),    // Object + classes
                Constraint::Length(3), // Status bar
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let title = Paragraph::new(Line::styled(session.title(), self.theme.title_style())).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.border_style()),
        );
        frame.render_widget(title, rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(rows[1]);

        let current = session.current();
        let info = state.object_info(session);
        frame.render_widget(
            ObjectPanel::new(current.entry, info, &self.style, &self.theme),
            columns[0],
        );
        frame.render_widget(
            ClassGuide::new(session.keys(), current.label, &self.theme),
            columns[1],
        );

        let latest = state.status.latest();
        frame.render_widget(
            StatusBar::new(latest.as_ref(), session.progress(), &self.theme),
            rows[2],
        );
        frame.render_widget(HelpBar::new(&self.hints, &self.theme), rows[3]);
    }
}
