//! # PaginatedList Component
//!
//! Fixed-size pages of cards with a `page / total` indicator.
//!
//! ## Architecture
//!
//! `PaginatedList` is a transient component (created each frame) that borrows
//! the items and the page's `Selection` as props, and `&'a mut Vec` of hit
//! rectangles as persistent TUI state. Mouse handling reads those rectangles
//! on the next event, so clicks always map to what was last drawn.
//!
//! Pages never hold more cards than the area fits. The row count used is
//! written to `fitted` so the event loop can hand it back to the core, which
//! then pages and moves the cursor over the same cards the user sees.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::api::types::non_blank;
use crate::api::{CourseResource, Formation, Module, Year};
use crate::core::page::Selection;
use crate::tui::component::Component;
use crate::tui::components::tilt::Tilt;
use crate::tui::theme::Palette;

/// Rows per card: top border, title, subtitle, bottom border.
pub const CARD_HEIGHT: u16 = 4;

/// Anything that can be shown as a card.
pub trait ListEntry {
    /// Main line. `index` is the absolute position in the list.
    fn title(&self, index: usize) -> String;

    fn subtitle(&self) -> Option<String> {
        None
    }
}

/// First non-blank candidate, else the placeholder.
fn first_named<'a>(
    candidates: impl IntoIterator<Item = Option<&'a str>>,
    placeholder: impl FnOnce() -> String,
) -> String {
    candidates
        .into_iter()
        .find_map(non_blank)
        .map(str::to_string)
        .unwrap_or_else(placeholder)
}

impl ListEntry for Year {
    fn title(&self, _index: usize) -> String {
        first_named([Some(self.name.as_str())], || format!("Year {}", self.id))
    }
}

impl ListEntry for Formation {
    fn title(&self, _index: usize) -> String {
        first_named([Some(self.name.as_str()), self.code.as_deref()], || {
            format!("Formation {}", self.id)
        })
    }

    fn subtitle(&self) -> Option<String> {
        Some(match non_blank(self.code.as_deref()) {
            Some(code) => format!("{} · {code}", self.category()),
            None => self.category().to_string(),
        })
    }
}

impl ListEntry for Module {
    fn title(&self, _index: usize) -> String {
        first_named([Some(self.name.as_str())], || "Untitled Module".to_string())
    }

    fn subtitle(&self) -> Option<String> {
        non_blank(self.code.as_deref()).map(str::to_string)
    }
}

impl ListEntry for CourseResource {
    fn title(&self, index: usize) -> String {
        self.label(index)
    }

    fn subtitle(&self) -> Option<String> {
        Some(if self.is_downloadable() {
            "⤓ Enter to download".to_string()
        } else {
            "No file available".to_string()
        })
    }
}

pub struct PaginatedList<'a, T: ListEntry> {
    pub items: &'a [T],
    pub selection: Selection,
    /// Last known mouse position, for hover and tilt.
    pub pointer: Option<(u16, u16)>,
    pub palette: Palette,
    pub accent: Color,
    /// Card rectangles drawn this frame, with their absolute item index.
    pub hits: &'a mut Vec<(Rect, usize)>,
    /// Cards that fit this frame.
    pub fitted: &'a mut Option<usize>,
}

/// Whole cards that fit in `height` rows, at least one.
fn cards_in(height: u16) -> usize {
    usize::from(height / CARD_HEIGHT).max(1)
}

impl<T: ListEntry> PaginatedList<'_, T> {
    fn render_card(&self, frame: &mut Frame, card: Rect, item: &T, index: usize) {
        let selected = index == self.selection.cursor();
        let tilt = self.pointer.and_then(|(col, row)| Tilt::at(card, col, row));

        let border_style = match (selected, tilt.is_some()) {
            (true, _) => Style::default()
                .fg(self.accent)
                .add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(self.accent),
            (false, false) => self.palette.muted(),
        };
        let title_style = if selected {
            Style::default()
                .fg(self.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.text)
        };

        let marker = if selected { "▸ " } else { "  " };
        let mut lines = vec![Line::from(vec![
            Span::styled(marker, title_style),
            Span::styled(item.title(index), title_style),
        ])];
        if let Some(subtitle) = item.subtitle() {
            lines.push(Line::from(Span::styled(
                format!("  {subtitle}"),
                self.palette.muted(),
            )));
        }

        let area = tilt.map(|t| t.lean_area(card)).unwrap_or(card);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(Style::default().bg(self.palette.surface));
        frame.render_widget(Paragraph::new(lines).block(block), area);

        if let Some(tilt) = tilt {
            let column = tilt.glare_column(area);
            if let Some(cell) = frame.buffer_mut().cell_mut((column, area.y)) {
                cell.set_style(Style::default().bg(self.palette.highlight));
            }
        }
    }

    fn pager_line(&self, page: usize, pages: usize) -> Line<'static> {
        let active = Style::default()
            .fg(self.palette.primary)
            .add_modifier(Modifier::BOLD);
        let disabled = self.palette.muted().add_modifier(Modifier::DIM);
        let left = if page == 0 { disabled } else { active };
        let right = if page + 1 >= pages { disabled } else { active };
        Line::from(vec![
            Span::styled("←", left),
            Span::raw("   "),
            Span::styled(
                format!("{} / {}", page + 1, pages),
                Style::default().fg(self.palette.text),
            ),
            Span::raw("   "),
            Span::styled("→", right),
        ])
    }
}

impl<T: ListEntry> Component for PaginatedList<'_, T> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.hits.clear();
        let len = self.items.len();

        // The pager row only exists with more than one page.
        let mut rows = cards_in(area.height);
        if self.selection.fitted(rows).page_count(len) > 1 {
            rows = cards_in(area.height.saturating_sub(1));
        }
        self.selection.fit(rows);
        *self.fitted = Some(rows);

        let pages = self.selection.page_count(len);
        let pager_height = if pages > 1 { 1 } else { 0 };
        let [cards_area, pager_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(pager_height)]).areas(area);

        let items = self.items;
        let range = self.selection.page_range(len);
        let start = range.start;
        for (slot, item) in items[range].iter().enumerate() {
            let y = cards_area.y + slot as u16 * CARD_HEIGHT;
            let card = Rect::new(cards_area.x, y, cards_area.width, CARD_HEIGHT)
                .intersection(cards_area);
            self.render_card(frame, card, item, start + slot);
            self.hits.push((card, start + slot));
        }

        if pages > 1 {
            let pager = self.pager_line(self.selection.page(), pages);
            frame.render_widget(
                Paragraph::new(pager).alignment(Alignment::Center),
                pager_area,
            );
        }
    }
}

/// Whatever was drawn under (`column`, `row`), if anything.
pub fn hit_test<T: Copy>(hits: &[(Rect, T)], column: u16, row: u16) -> Option<T> {
    hits.iter()
        .find(|(rect, _)| rect.contains(Position::new(column, row)))
        .map(|(_, target)| *target)
}
