//! Key to label list shown next to the object

use crate::keybinds::KeyBindingTable;
use crate::labels::LabelValue;
use crate::ui::viewer::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Class guide; the entry matching the current label is highlighted
pub struct ClassGuide<'a> {
    keys: &'a KeyBindingTable,
    current: &'a LabelValue,
    theme: &'a Theme,
}

impl<'a> ClassGuide<'a> {
    #[must_use]
    pub const fn new(keys: &'a KeyBindingTable, current: &'a LabelValue, theme: &'a Theme) -> Self {
        Self {
            keys,
            current,
            theme,
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        self.keys
            .bindings()
            .map(|(key, token)| {
                let text = format!(" {token} ");
                let label = if self.current.token() == Some(token) {
                    Span::styled(text, self.theme.current_style())
                } else {
                    Span::raw(text)
                };
                Line::from(vec![
                    Span::styled(format!(" {key}"), self.theme.key_style()),
                    Span::styled(":", self.theme.dimmed_style()),
                    label,
                ])
            })
            .collect()
    }
}

impl Widget for ClassGuide<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Classes ");

        Paragraph::new(self.lines()).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(widget: ClassGuide<'_>, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_lists_every_binding() {
        let keys = KeyBindingTable::default();
        let theme = Theme::default();
        let text = rendered(ClassGuide::new(&keys, &LabelValue::Unlabeled, &theme), 20, 8);

        for label in ["bad", "multiple", "ok", "good", "ignore"] {
            assert!(text.contains(label), "missing {label}");
        }
    }
}
