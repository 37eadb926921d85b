//! # Landing Page Component
//!
//! Welcome screen: brand, a short pitch and the call to action. The accent
//! underline sweeps with `frame_index` while the page is shown.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Palette;

const FEATURES: [(&str, &str); 3] = [
    ("Module Summaries", "Concise PDF guides for quick revision."),
    ("Exams (EFF)", "Regional and national end-of-year exams."),
    ("Practical Exercises", "Hands-on labs and case studies."),
];

const SWEEP_WIDTH: usize = 24;

pub struct LandingPage {
    frame_index: usize,
    palette: Palette,
}

impl LandingPage {
    pub fn new(frame_index: usize, palette: Palette) -> Self {
        Self {
            frame_index,
            palette,
        }
    }

    fn sweep(&self) -> Line<'static> {
        let head = self.frame_index % SWEEP_WIDTH;
        let spans: Vec<Span> = (0..SWEEP_WIDTH)
            .map(|i| {
                let color = if i.abs_diff(head) <= 2 {
                    self.palette.highlight
                } else {
                    self.palette.primary
                };
                Span::styled("━", Style::default().fg(color))
            })
            .collect();
        Line::from(spans)
    }
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                "OFPPT Cours",
                Style::default()
                    .fg(self.palette.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            self.sweep(),
            Line::from(Span::styled(
                "Office de la Formation Professionnelle et de la Promotion du Travail",
                self.palette.muted(),
            )),
            Line::default(),
            Line::from(Span::styled(
                "A Complete Academic Library",
                Style::default()
                    .fg(self.palette.text)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        for (name, blurb) in FEATURES {
            lines.push(Line::from(vec![
                Span::styled(format!("{name}: "), Style::default().fg(self.palette.primary)),
                Span::styled(blurb, Style::default().fg(self.palette.text)),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                " Enter ",
                Style::default()
                    .fg(self.palette.primary)
                    .bg(self.palette.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Get started", Style::default().fg(self.palette.text)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            self.palette.muted(),
        )));

        let [centered] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
    }
}
