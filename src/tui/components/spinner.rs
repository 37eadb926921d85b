//! Frame-indexed loading indicator.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Palette;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct Spinner {
    pub frame_index: usize,
    pub palette: Palette,
}

impl Spinner {
    pub fn new(frame_index: usize, palette: Palette) -> Self {
        Self {
            frame_index,
            palette,
        }
    }

    pub fn glyph(frame_index: usize) -> &'static str {
        FRAMES[frame_index % FRAMES.len()]
    }
}

impl Component for Spinner {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    Self::glyph(self.frame_index),
                    Style::default().fg(self.palette.highlight),
                ),
                Span::raw(" "),
                Span::styled(
                    "Loading",
                    Style::default()
                        .fg(self.palette.primary)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled("Please wait...", self.palette.muted())),
        ];

        let [centered] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
    }
}
