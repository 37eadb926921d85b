//! # Actions
//!
//! Everything that can happen in Cours becomes an `Action`.
//! User presses Enter on a year? That's `Action::Open`.
//! The API answers? That's `Action::Fetched { generation, result }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an [`Effect`] for the event loop to carry out. No
//! I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::api::{ApiError, ResourceKind};
use crate::core::download::DownloadRequest;
use crate::core::fetch::{FetchRequest, Payload};
use crate::core::page::Activation;
use crate::core::route::Route;
use crate::core::state::{App, HistoryEntry};

#[derive(Debug)]
pub enum Action {
    /// Go to `route`, pushing the current page onto the back stack.
    Navigate {
        route: Route,
        label: Option<String>,
    },
    /// Activate the selected item.
    Open,
    /// Move the cursor to an absolute item index.
    Select(usize),
    Back,
    Home,
    Retry,
    CursorUp,
    CursorDown,
    NextPage,
    PrevPage,
    SelectTab(ResourceKind),
    NextTab,
    PrevTab,
    ToggleTheme,
    CycleBackground,
    /// A background fetch finished.
    Fetched {
        generation: u64,
        result: Result<Payload, ApiError>,
    },
    /// The list area now fits this many cards.
    FitPage(usize),
    /// Throw the whole app state away and start over on the welcome page.
    Reset,
    Quit,
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Fetch(FetchRequest),
    Download(DownloadRequest),
    SavePreferences,
    Quit,
}

impl From<Option<FetchRequest>> for Effect {
    fn from(fetch: Option<FetchRequest>) -> Self {
        fetch.map(Effect::Fetch).unwrap_or(Effect::None)
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Navigate { route, label } => navigate(app, route, label),
        Action::Open => match app.page.activate() {
            Activation::Navigate { route, label } => navigate(app, route, label),
            Activation::Download(request) => {
                app.status_message = format!("Downloading {}", request.filename);
                Effect::Download(request)
            }
            Activation::Nothing => Effect::None,
        },
        Action::Select(index) => {
            app.page.select(index);
            Effect::None
        }
        Action::Back => back(app),
        Action::Home => {
            if app.route() == Route::Welcome {
                return Effect::None;
            }
            app.history.clear();
            app.open(&Route::Welcome, None).into()
        }
        Action::Retry => {
            let fetch = app.page.retry();
            if let Some(request) = &fetch {
                info!("Retrying {:?}", request.query);
            }
            fetch.into()
        }
        Action::CursorUp => {
            app.page.cursor_up();
            Effect::None
        }
        Action::CursorDown => {
            app.page.cursor_down();
            Effect::None
        }
        Action::NextPage => {
            app.page.next_page();
            Effect::None
        }
        Action::PrevPage => {
            app.page.prev_page();
            Effect::None
        }
        Action::SelectTab(kind) => app.page.select_tab(kind).into(),
        Action::NextTab => match app.page.tab() {
            Some(tab) => app.page.select_tab(tab.next()).into(),
            None => Effect::None,
        },
        Action::PrevTab => match app.page.tab() {
            Some(tab) => app.page.select_tab(tab.prev()).into(),
            None => Effect::None,
        },
        Action::ToggleTheme => {
            app.prefs.toggle_theme();
            app.status_message = format!("Theme: {}", app.prefs.theme.label());
            Effect::SavePreferences
        }
        Action::CycleBackground => {
            app.prefs.cycle_background();
            app.status_message = format!("Background {}", app.prefs.background_index() + 1);
            Effect::SavePreferences
        }
        Action::Fetched { generation, result } => {
            let applied = app.page.settle(generation, result);
            debug!("Fetch result for generation {} applied: {}", generation, applied);
            Effect::None
        }
        Action::FitPage(rows) => {
            debug!("List area fits {} card(s)", rows);
            app.page_capacity = Some(rows);
            app.page.fit(rows);
            Effect::None
        }
        Action::Reset => {
            info!("Resetting application state");
            app.reset();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn navigate(app: &mut App, route: Route, label: Option<String>) -> Effect {
    info!("Navigating {} -> {}", app.route(), route);
    app.history.push(HistoryEntry {
        route: app.route(),
        label: app.label.take(),
    });
    app.open(&route, label).into()
}

fn back(app: &mut App) -> Effect {
    let (route, label) = match app.history.pop() {
        Some(entry) => (entry.route, entry.label),
        None => {
            let current = app.route();
            if current == Route::Welcome {
                return Effect::None;
            }
            (current.parent(), None)
        }
    };
    info!("Back to {}", route);
    app.open(&route, label).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Id;
    use crate::api::catalog::{modules_path, resources_path, years_path};
    use crate::core::fetch::Query;
    use crate::core::page::Page;
    use crate::core::prefs::ThemeMode;
    use crate::core::resource::View;
    use crate::test_support::{
        FakeCatalog, courses_route, formations_route, modules_json, modules_route, test_app,
        test_app_with, timeout_error, years_json,
    };
    use serde_json::json;

    fn id(raw: &str) -> Id {
        Id::parse(raw).unwrap()
    }

    fn open_route(route: Route) -> Action {
        Action::Navigate { route, label: None }
    }

    /// Run the fetch an effect asks for against the app's catalog and feed
    /// the answer back, the way the event loop does.
    fn run_fetch(app: &mut App, effect: Effect) -> Effect {
        let Effect::Fetch(request) = effect else {
            panic!("expected a fetch effect, got {effect:?}");
        };
        let result = tokio_test::block_on(request.query.run(app.catalog.as_ref()));
        update(
            app,
            Action::Fetched {
                generation: request.generation,
                result,
            },
        )
    }

    #[test]
    fn test_levels_rendered_in_order() {
        let (mut app, _) = test_app_with(FakeCatalog::new().respond(years_path(), years_json()));
        let effect = update(&mut app, open_route(Route::Levels));
        run_fetch(&mut app, effect);

        let Page::Levels(list) = &app.page else {
            panic!("expected levels page")
        };
        let orders: Vec<i64> = list.items().iter().map(|y| y.order).collect();
        assert_eq!(orders, vec![1, 2]);
    }

    #[test]
    fn test_missing_param_makes_no_call() {
        let (mut app, catalog) = test_app_with(FakeCatalog::new());
        let effect = update(&mut app, open_route(Route::Formations { year_id: None }));
        assert_eq!(effect, Effect::None);
        assert_eq!(catalog.call_count(), 0);

        let Page::Formations(list) = &app.page else {
            panic!("expected formations page")
        };
        assert_eq!(list.resource.view(), View::Empty);
    }

    #[test]
    fn test_modules_timeout_then_retry() {
        let path = modules_path(&id("5"));
        let (mut app, catalog) = test_app_with(
            FakeCatalog::new()
                .fail(path.clone(), timeout_error())
                .respond(path.clone(), modules_json()),
        );

        let first = update(&mut app, open_route(modules_route("5")));
        let Effect::Fetch(first_request) = first.clone() else {
            panic!("expected fetch")
        };
        run_fetch(&mut app, first);
        {
            let Page::Modules(list) = &app.page else {
                panic!("expected modules page")
            };
            assert_eq!(list.resource.view(), View::Error("timeout of 10000ms exceeded"));
        }

        let retry = update(&mut app, Action::Retry);
        let Effect::Fetch(retry_request) = retry.clone() else {
            panic!("expected fetch")
        };
        assert_eq!(retry_request.query, first_request.query);
        assert_ne!(retry_request.generation, first_request.generation);
        run_fetch(&mut app, retry);

        let Page::Modules(list) = &app.page else {
            panic!("expected modules page")
        };
        assert_eq!(list.items().len(), 2);
        assert_eq!(catalog.calls(), vec![path.clone(), path]);
    }

    #[test]
    fn test_efm_tab_switch_while_cours_in_flight() {
        let module = id("9");
        let (mut app, _) = test_app_with(
            FakeCatalog::new()
                .respond(
                    resources_path(&module, ResourceKind::Cours),
                    json!([{ "id": 1, "title": "Cours 1" }]),
                )
                .respond(
                    resources_path(&module, ResourceKind::Efm),
                    json!([{ "id": 2, "title": "EFM 2024" }]),
                ),
        );

        let cours = update(&mut app, open_route(courses_route("9")));
        let efm = update(&mut app, Action::SelectTab(ResourceKind::Efm));
        let efm_query = Query::Resources(module, ResourceKind::Efm);
        assert!(matches!(&efm, Effect::Fetch(r) if r.query == efm_query));

        run_fetch(&mut app, efm);
        run_fetch(&mut app, cours);

        let Page::Courses(page) = &app.page else {
            panic!("expected courses page")
        };
        assert_eq!(page.tab, ResourceKind::Efm);
        assert_eq!(page.list.items()[0].title.as_deref(), Some("EFM 2024"));
    }

    #[test]
    fn test_controls_failure_shows_empty() {
        let module = id("9");
        let (mut app, _) = test_app_with(
            FakeCatalog::new().fail(
                resources_path(&module, ResourceKind::Controls),
                timeout_error(),
            ),
        );
        update(&mut app, open_route(courses_route("9")));
        let effect = update(&mut app, Action::NextTab);
        run_fetch(&mut app, effect);

        let Page::Courses(page) = &app.page else {
            panic!("expected courses page")
        };
        assert_eq!(page.tab, ResourceKind::Controls);
        assert_eq!(page.list.resource.view(), View::Empty);
    }

    #[test]
    fn test_resource_without_file_no_download() {
        let module = id("9");
        let (mut app, _) = test_app_with(FakeCatalog::new().respond(
            resources_path(&module, ResourceKind::Cours),
            json!([
                { "id": 1, "title": "No file" },
                { "id": 2, "title": "Slides", "file_url": "https://cdn.example/s.pptx" }
            ]),
        ));
        let effect = update(&mut app, open_route(courses_route("9")));
        run_fetch(&mut app, effect);

        assert_eq!(update(&mut app, Action::Open), Effect::None);

        update(&mut app, Action::Select(1));
        let effect = update(&mut app, Action::Open);
        assert_eq!(
            effect,
            Effect::Download(DownloadRequest {
                url: "https://cdn.example/s.pptx".to_string(),
                filename: "Slides.pptx".to_string(),
            })
        );
        assert_eq!(app.status_message, "Downloading Slides.pptx");
    }

    #[test]
    fn test_open_goes_one_level_deeper_with_label() {
        let (mut app, _) = test_app_with(FakeCatalog::new().respond(years_path(), years_json()));
        let effect = update(&mut app, Action::Open);
        assert_eq!(app.route(), Route::Levels);
        run_fetch(&mut app, effect);
        let effect = update(&mut app, Action::Open);

        assert_eq!(app.route(), formations_route("1"));
        assert_eq!(app.label.as_deref(), Some("1ère année"));
        assert!(matches!(effect, Effect::Fetch(r) if r.query == Query::Formations(id("1"))));
    }

    #[test]
    fn test_back_pops_history_then_parent() {
        let mut app = test_app();
        update(&mut app, open_route(Route::Levels));
        update(
            &mut app,
            Action::Navigate {
                route: formations_route("1"),
                label: Some("1ère année".to_string()),
            },
        );
        update(&mut app, Action::Back);
        assert_eq!(app.route(), Route::Levels);
        update(&mut app, Action::Back);
        assert_eq!(app.route(), Route::Welcome);
        assert_eq!(update(&mut app, Action::Back), Effect::None);

        app.open(&courses_route("9"), None);
        update(&mut app, Action::Back);
        assert_eq!(app.route(), Route::Levels);
    }

    #[test]
    fn test_breadcrumb_label_restored_on_back() {
        let mut app = test_app();
        update(
            &mut app,
            Action::Navigate {
                route: formations_route("1"),
                label: Some("1ère année".to_string()),
            },
        );
        update(
            &mut app,
            Action::Navigate {
                route: modules_route("7"),
                label: Some("DD".to_string()),
            },
        );
        update(&mut app, Action::Back);
        assert_eq!(app.label.as_deref(), Some("1ère année"));
    }

    #[test]
    fn test_stale_result_after_navigation_ignored() {
        let (mut app, _) = test_app_with(FakeCatalog::new().respond(years_path(), years_json()));
        let levels = update(&mut app, open_route(Route::Levels));
        update(&mut app, Action::Back);
        run_fetch(&mut app, levels);
        assert_eq!(app.route(), Route::Welcome);
    }

    #[test]
    fn test_theme_and_background_persist() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::ToggleTheme), Effect::SavePreferences);
        assert_eq!(app.prefs.theme, ThemeMode::Dark);
        assert_eq!(update(&mut app, Action::CycleBackground), Effect::SavePreferences);
        assert_eq!(app.prefs.background, 1);
    }

    #[test]
    fn test_home_clears_history() {
        let mut app = test_app();
        update(&mut app, open_route(Route::Levels));
        update(&mut app, Action::Home);
        assert_eq!(app.route(), Route::Welcome);
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_reset_and_quit() {
        let mut app = test_app();
        update(&mut app, open_route(Route::Levels));
        assert_eq!(update(&mut app, Action::Reset), Effect::None);
        assert_eq!(app.route(), Route::Welcome);
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[test]
    fn test_tab_keys_ignored_outside_courses() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::NextTab), Effect::None);
        assert_eq!(update(&mut app, Action::SelectTab(ResourceKind::Efm)), Effect::None);
    }

    #[test]
    fn test_fit_page_applies_to_current_and_next_pages() {
        let (mut app, _) = test_app_with(FakeCatalog::new().respond(years_path(), years_json()));
        let effect = update(&mut app, open_route(Route::Levels));
        update(&mut app, Action::FitPage(2));
        assert_eq!(app.page.selection().map(|s| s.per_page()), Some(2));
        run_fetch(&mut app, effect);

        update(&mut app, open_route(formations_route("1")));
        assert_eq!(app.page.selection().map(|s| s.per_page()), Some(2));
    }
}
