//! # TitleBar Component
//!
//! Top line: app name, breadcrumb trail, status message and theme indicator.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let crumbs = app.breadcrumbs();
//! let mut title_bar = TitleBar::new(crumbs, &app.status_message, app.prefs.theme, palette);
//! title_bar.render(frame, area);
//! ```
//!
//! When the trail does not fit, the oldest crumbs are dropped first and
//! replaced with `…`, so the current page is always visible.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::prefs::ThemeMode;
use crate::tui::component::Component;
use crate::tui::theme::Palette;

const APP_NAME: &str = " OFPPT Cours ";
const SEPARATOR: &str = " › ";

pub struct TitleBar<'a> {
    pub breadcrumbs: Vec<String>,
    pub status_message: &'a str,
    pub theme: ThemeMode,
    pub palette: Palette,
}

impl<'a> TitleBar<'a> {
    pub fn new(
        breadcrumbs: Vec<String>,
        status_message: &'a str,
        theme: ThemeMode,
        palette: Palette,
    ) -> Self {
        Self {
            breadcrumbs,
            status_message,
            theme,
            palette,
        }
    }
}

/// Join `crumbs` into at most `max_width` columns, eliding from the front.
pub fn fit_breadcrumbs(crumbs: &[String], max_width: usize) -> String {
    let full = crumbs.join(SEPARATOR);
    if full.width() <= max_width {
        return full;
    }
    for skip in 1..crumbs.len() {
        let candidate = format!("…{}{}", SEPARATOR, crumbs[skip..].join(SEPARATOR));
        if candidate.width() <= max_width {
            return candidate;
        }
    }
    // Even the last crumb alone is too wide: hard truncate it.
    let last = crumbs.last().map(String::as_str).unwrap_or_default();
    let mut out = String::new();
    for c in last.chars() {
        if out.width() + 2 > max_width {
            out.push('…');
            break;
        }
        out.push(c);
    }
    out
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let theme_icon = match self.theme {
            ThemeMode::Light => " ☀ ",
            ThemeMode::Dark => " ☾ ",
        };
        let status_width = if self.status_message.is_empty() {
            0
        } else {
            self.status_message.width() as u16 + 3
        };
        let [left, right] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(status_width + theme_icon.width() as u16),
        ])
        .areas(area);

        let crumb_width = (left.width as usize).saturating_sub(APP_NAME.width() + 1);
        let crumbs = fit_breadcrumbs(&self.breadcrumbs, crumb_width);
        let left_line = Line::from(vec![
            Span::styled(
                APP_NAME,
                Style::default()
                    .fg(self.palette.primary)
                    .bg(self.palette.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(crumbs, Style::default().fg(self.palette.text)),
        ]);

        let mut right_spans = Vec::new();
        if !self.status_message.is_empty() {
            right_spans.push(Span::styled(self.status_message, self.palette.muted()));
            right_spans.push(Span::raw(" | "));
        }
        right_spans.push(Span::styled(theme_icon, Style::default().fg(self.palette.primary)));

        frame.render_widget(Paragraph::new(left_line), left);
        frame.render_widget(Paragraph::new(Line::from(right_spans)), right);
    }
}
