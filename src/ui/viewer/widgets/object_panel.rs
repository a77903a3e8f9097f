//! Summary of the object on screen: files, headers and display style

use crate::config::{LayerStyle, ViewerStyle};
use crate::dataset::DatasetEntry;
use crate::pointcloud::LasHeader;
use crate::ui::viewer::state::ObjectInfo;
use crate::ui::viewer::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct ObjectPanel<'a> {
    entry: &'a DatasetEntry,
    info: &'a ObjectInfo,
    style: &'a ViewerStyle,
    theme: &'a Theme,
}

impl<'a> ObjectPanel<'a> {
    #[must_use]
    pub const fn new(
        entry: &'a DatasetEntry,
        info: &'a ObjectInfo,
        style: &'a ViewerStyle,
        theme: &'a Theme,
    ) -> Self {
        Self {
            entry,
            info,
            style,
            theme,
        }
    }

    fn header_line(&self, header: &Result<LasHeader, String>) -> Line<'a> {
        match header {
            Ok(header) => Line::from(format!("    {header}")),
            Err(e) => Line::from(Span::styled(format!("    {e}"), self.theme.missing_style())),
        }
    }

    fn layer_line(&self, name: &'a str, layer: &LayerStyle) -> Line<'a> {
        let color = layer.color.map_or_else(
            || "file colors".to_string(),
            |[r, g, b]| format!("color ({r:.2}, {g:.2}, {b:.2})"),
        );
        let voxel = layer
            .voxel_size
            .map_or_else(String::new, |v| format!(", voxel {v}"));
        Line::from(vec![
            Span::styled(name, self.theme.dimmed_style()),
            Span::raw(format!("point size {}, {color}{voxel}", layer.point_size)),
        ])
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let label = |text: &'a str| Span::styled(text, self.theme.dimmed_style());
        let path_style = self.theme.path_style();

        let mut lines = vec![
            Line::from(vec![
                label("object      "),
                Span::styled(self.entry.foreground_relative_path.to_string(), path_style),
            ]),
            self.header_line(&self.info.foreground),
        ];

        match (&self.entry.background_absolute_path, &self.info.background) {
            (Some(path), Some(header)) => {
                lines.push(Line::from(vec![
                    label("background  "),
                    Span::styled(path.display().to_string(), path_style),
                ]));
                lines.push(self.header_line(header));
            }
            _ => lines.push(Line::from(vec![
                label("background  "),
                Span::styled("(none)", self.theme.dimmed_style()),
            ])),
        }

        let [bx, by, bz] = self.style.view_box;
        lines.push(Line::default());
        lines.push(self.layer_line("foreground  ", &self.style.foreground));
        lines.push(self.layer_line("background  ", &self.style.background));
        lines.push(Line::from(vec![
            label("view        "),
            Span::raw(format!(
                "{:?}, box {bx} x {by} x {bz}",
                self.style.viewpoint
            )),
        ]));
        lines
    }
}

impl Widget for ObjectPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Object ");

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
