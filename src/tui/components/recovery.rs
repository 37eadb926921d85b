//! Full-screen fallback shown after a panic during rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub struct Recovery {
    pub palette: Palette,
}

impl Component for Recovery {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Block::new().style(self.palette.base()), area);

        let key = Style::default()
            .fg(self.palette.surface)
            .bg(self.palette.primary)
            .add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(Span::styled(
                "Oops!",
                Style::default()
                    .fg(self.palette.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Something went wrong",
                Style::default().fg(self.palette.text),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled(" Enter ", key),
                Span::raw(" Return home   "),
                Span::styled(" q ", key),
                Span::raw(" Quit"),
            ]),
        ];
        let [centered] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
    }
}
