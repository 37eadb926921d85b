//! # ErrorMessage Component
//!
//! Failure view with a retry hint. The message is wrapped with `textwrap` so
//! long server messages stay readable on narrow terminals.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub const DEFAULT_ERROR: &str = "Something went wrong. Please try again.";

pub struct ErrorMessage<'a> {
    pub message: &'a str,
    pub palette: Palette,
}

impl<'a> ErrorMessage<'a> {
    pub fn new(message: &'a str, palette: Palette) -> Self {
        Self { message, palette }
    }

    fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let message = if self.message.trim().is_empty() {
            DEFAULT_ERROR
        } else {
            self.message
        };
        let wrap_width = (width.saturating_sub(4) as usize).clamp(10, 60);

        let mut lines = vec![
            Line::from(Span::styled(
                "⚠  Oops!",
                Style::default()
                    .fg(self.palette.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];
        let text_style = Style::default().fg(self.palette.text);
        lines.extend(
            textwrap::wrap(message, wrap_width)
                .into_iter()
                .map(|l| Line::from(Span::styled(l.into_owned(), text_style))),
        );
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                " r ",
                Style::default()
                    .fg(self.palette.surface)
                    .bg(self.palette.error)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Try again", self.palette.muted()),
        ]));
        lines
    }
}

impl Component for ErrorMessage<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines(area.width);
        let [centered] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
    }
}
