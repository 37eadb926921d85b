use crate::core::page::{ListPage, Page};
use crate::core::resource::View;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    EmptyState, ErrorMessage, LandingPage, ListEntry, PaginatedList, ResourceTabs, Spinner,
    TitleBar,
};
use crate::tui::theme::Palette;

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Margin, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

/// Content column width; wider terminals get side margins.
const MAX_CONTENT_WIDTH: u16 = 72;

/// Empty-state copy: heading and detail line.
struct EmptyCopy<'a> {
    title: &'a str,
    detail: &'a str,
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let palette = Palette::for_prefs(&app.prefs);
    frame.render_widget(Block::new().style(palette.base()), frame.area());

    let [title_area, main_area, footer_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    TitleBar::new(
        app.breadcrumbs(),
        &app.status_message,
        app.prefs.theme,
        palette,
    )
    .render(frame, title_area);

    tui.list_hits.clear();
    tui.tab_hits.clear();

    let [column] = Layout::horizontal([Constraint::Max(MAX_CONTENT_WIDTH)])
        .flex(Flex::Center)
        .areas(main_area.inner(Margin::new(1, 1)));

    match &app.page {
        Page::Welcome => LandingPage::new(spinner_frame, palette).render(frame, column),
        Page::Levels(list) => {
            let body = draw_header(
                frame,
                column,
                "Education Levels",
                "Choose your year of study.",
                palette,
            );
            draw_list(
                frame,
                body,
                list,
                tui,
                palette,
                palette.primary,
                spinner_frame,
                EmptyCopy {
                    title: "No Levels Found",
                    detail: "There are no years available yet.",
                },
            );
        }
        Page::Formations(list) => {
            let body = draw_header(
                frame,
                column,
                "Formations",
                "Choose your specialization.",
                palette,
            );
            draw_list(
                frame,
                body,
                list,
                tui,
                palette,
                palette.primary,
                spinner_frame,
                EmptyCopy {
                    title: "No Formations Found",
                    detail: "There are no formations available for this year.",
                },
            );
        }
        Page::Modules(list) => {
            let body = draw_header(
                frame,
                column,
                "Modules",
                "Choose a module to explore its resources.",
                palette,
            );
            draw_list(
                frame,
                body,
                list,
                tui,
                palette,
                palette.primary,
                spinner_frame,
                EmptyCopy {
                    title: "No Modules Found",
                    detail: "There are no modules available for this formation.",
                },
            );
        }
        Page::Courses(page) => {
            let body = draw_header(frame, column, page.tab.heading(), page.tab.blurb(), palette);
            let [tabs_area, _, list_area] =
                Layout::vertical([Length(1), Length(1), Min(0)]).areas(body);
            ResourceTabs {
                active: page.tab,
                palette,
                hits: &mut tui.tab_hits,
            }
            .render(frame, tabs_area);

            let title = format!("No {} Yet", page.tab.empty_noun());
            draw_list(
                frame,
                list_area,
                &page.list,
                tui,
                palette,
                palette.accent(page.tab),
                spinner_frame,
                EmptyCopy {
                    title: &title,
                    detail: "Check back later or try switching to another category.",
                },
            );
        }
    }

    frame.render_widget(
        Paragraph::new(footer_hints(&app.page, palette.muted)),
        footer_area,
    );
}

/// Heading plus subtitle; returns the area left below them.
fn draw_header(
    frame: &mut Frame,
    area: Rect,
    heading: &str,
    subtitle: &str,
    palette: Palette,
) -> Rect {
    use Constraint::{Length, Min};
    let [heading_area, subtitle_area, _, body] =
        Layout::vertical([Length(1), Length(1), Length(1), Min(0)]).areas(area);
    frame.render_widget(
        Paragraph::new(Span::styled(heading.to_string(), palette.heading())),
        heading_area,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(subtitle.to_string(), palette.muted())),
        subtitle_area,
    );
    body
}

/// Loading → Error → Empty → List, in that precedence.
#[allow(clippy::too_many_arguments)]
fn draw_list<K, T>(
    frame: &mut Frame,
    area: Rect,
    list: &ListPage<K, T>,
    tui: &mut TuiState,
    palette: Palette,
    accent: Color,
    spinner_frame: usize,
    empty: EmptyCopy,
) where
    K: Clone + std::fmt::Debug,
    T: ListEntry,
{
    match list.resource.view() {
        View::Loading => Spinner::new(spinner_frame, palette).render(frame, area),
        View::Error(message) => ErrorMessage::new(message, palette).render(frame, area),
        View::Empty => EmptyState {
            title: empty.title,
            detail: empty.detail,
            palette,
        }
        .render(frame, area),
        View::List(items) => PaginatedList {
            items,
            selection: list.selection,
            pointer: tui.pointer,
            palette,
            accent,
            hits: &mut tui.list_hits,
            fitted: &mut tui.page_capacity,
        }
        .render(frame, area),
    }
}

fn footer_hints(page: &Page, color: Color) -> Line<'static> {
    let hints = match page {
        Page::Welcome => "Enter start · t theme · b background · q quit",
        Page::Courses(_) => {
            "↑↓ move · ←→ page · Tab/1-3 category · Enter download · Esc back · r retry · q quit"
        }
        _ => "↑↓ move · ←→ page · Enter open · Esc back · r retry · g home · q quit",
    };
    Line::from(Span::styled(format!(" {hints}"), Style::default().fg(color)))
}
