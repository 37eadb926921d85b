//! Resource-kind tab strip for the courses page. Each tab takes the accent
//! color of its kind when active.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::api::ResourceKind;
use crate::tui::component::Component;
use crate::tui::theme::Palette;

const GAP: u16 = 1;

pub struct ResourceTabs<'a> {
    pub active: ResourceKind,
    pub palette: Palette,
    /// Tab rectangles drawn this frame.
    pub hits: &'a mut Vec<(Rect, ResourceKind)>,
}

fn tab_text(kind: ResourceKind) -> String {
    format!(" {} {} ", kind.index() + 1, kind.label())
}

impl Component for ResourceTabs<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.hits.clear();
        let mut spans = Vec::new();
        let mut x = area.x;

        for kind in ResourceKind::ALL {
            let text = tab_text(kind);
            let width = text.width() as u16;
            let accent = self.palette.accent(kind);
            let style = if kind == self.active {
                Style::default()
                    .fg(self.palette.surface)
                    .bg(accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(accent)
            };

            if x < area.right() {
                let visible = width.min(area.right() - x);
                self.hits.push((Rect::new(x, area.y, visible, 1), kind));
            }
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" ".repeat(GAP as usize)));
            x = x.saturating_add(width + GAP);
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prefs::Preferences;
    use crate::tui::components::paginated_list::hit_test;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_tabs_render_and_record_hits() {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut hits = Vec::new();
        terminal
            .draw(|f| {
                let mut tabs = ResourceTabs {
                    active: ResourceKind::Controls,
                    palette: Palette::for_prefs(&Preferences::default()),
                    hits: &mut hits,
                };
                tabs.render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("1 Cours"));
        assert!(text.contains("2 Controls"));
        assert!(text.contains("3 EFM"));

        assert_eq!(hits.len(), 3);
        let (efm_rect, _) = hits[2];
        assert_eq!(hit_test(&hits, efm_rect.x, 0), Some(ResourceKind::Efm));
        assert_eq!(hit_test(&hits, 0, 0), Some(ResourceKind::Cours));
        assert_eq!(hit_test(&hits, 59, 0), None);
    }

    #[test]
    fn test_active_tab_uses_kind_accent() {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let palette = Palette::for_prefs(&Preferences::default());
        let mut hits = Vec::new();
        terminal
            .draw(|f| {
                ResourceTabs {
                    active: ResourceKind::Efm,
                    palette,
                    hits: &mut hits,
                }
                .render(f, f.area());
            })
            .unwrap();

        let (rect, _) = hits[2];
        let cell = &terminal.backend().buffer()[(rect.x + 1, 0)];
        assert_eq!(cell.bg, palette.accent(ResourceKind::Efm));
    }
}
