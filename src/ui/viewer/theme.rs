//! Colors for the labeling view

use crate::ui::output::MessageLevel;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Color,
    /// Label keys in the class guide and help bar
    pub key: Color,
    /// Highlight for the current object's label
    pub current_bg: Color,
    pub current_fg: Color,
    pub path: Color,
    pub missing: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub border: Color,
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            title: Color::White,
            key: Color::Cyan,
            current_bg: Color::Blue,
            current_fg: Color::White,
            path: Color::White,
            missing: Color::Red,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Cyan,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
        }
    }

    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_style(&self) -> Style {
        Style::default().fg(self.key).add_modifier(Modifier::BOLD)
    }

    /// Class guide entry matching the current label
    #[must_use]
    pub fn current_style(&self) -> Style {
        Style::default()
            .bg(self.current_bg)
            .fg(self.current_fg)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn path_style(&self) -> Style {
        Style::default().fg(self.path)
    }

    /// Missing or unreadable files
    #[must_use]
    pub fn missing_style(&self) -> Style {
        Style::default().fg(self.missing)
    }

    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    #[must_use]
    pub fn message_style(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Normal => Style::default(),
            MessageLevel::Success => Style::default().fg(self.success),
            MessageLevel::Error => Style::default().fg(self.error),
            MessageLevel::Warning => Style::default().fg(self.warning),
            MessageLevel::Info => Style::default().fg(self.info),
        }
    }
}
