//! Status bar widget: latest message and labeling progress

use crate::session::Progress;
use crate::ui::output::StatusMessage;
use crate::ui::viewer::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct StatusBar<'a> {
    message: Option<&'a StatusMessage>,
    progress: Progress,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub const fn new(message: Option<&'a StatusMessage>, progress: Progress, theme: &'a Theme) -> Self {
        Self {
            message,
            progress,
            theme,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Status ");

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(24)])
            .split(inner);

        if let Some(message) = self.message {
            let style = self.theme.message_style(message.level);
            Paragraph::new(Line::from(vec![
                Span::styled(message.level.prefix(), style),
                Span::styled(message.text.as_str(), style),
            ]))
            .render(chunks[0], buf);
        }

        let counter = format!(
            "labeled {}/{}",
            self.progress.labeled, self.progress.total
        );
        Paragraph::new(Line::from(Span::styled(counter, self.theme.dimmed_style())))
            .right_aligned()
            .render(chunks[1], buf);
    }
}
