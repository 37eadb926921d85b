//! # Application State
//!
//! Core business state for Cours. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── catalog: Arc<dyn CatalogSource>   // where lists come from
//! ├── page: Page                        // current page, owns its resource
//! ├── history: Vec<HistoryEntry>        // back stack
//! ├── label: Option<String>             // breadcrumb hint for current page
//! ├── prefs: Preferences                // theme + background
//! ├── status_message: String            // status bar text
//! ├── items_per_page: usize
//! ├── page_capacity: Option<usize>      // cards the screen fits
//! └── download_dir: PathBuf
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::CatalogSource;
use crate::core::config::ResolvedConfig;
use crate::core::fetch::FetchRequest;
use crate::core::page::{DEFAULT_ITEMS_PER_PAGE, Page};
use crate::core::prefs::Preferences;
use crate::core::route::Route;

pub const WELCOME_STATUS: &str = "Welcome to OFPPT Cours!";

/// A page we can go back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub route: Route,
    pub label: Option<String>,
}

pub struct App {
    pub catalog: Arc<dyn CatalogSource>,
    pub page: Page,
    pub history: Vec<HistoryEntry>,
    pub label: Option<String>,
    pub prefs: Preferences,
    pub status_message: String,
    pub items_per_page: usize,
    /// Cards the list area can show, as last reported by the UI.
    pub page_capacity: Option<usize>,
    pub download_dir: PathBuf,
}

impl App {
    /// A fresh app on the welcome page.
    pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
        Self {
            catalog,
            page: Page::Welcome,
            history: Vec::new(),
            label: None,
            prefs: Preferences::default(),
            status_message: WELCOME_STATUS.to_string(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            page_capacity: None,
            download_dir: PathBuf::from("."),
        }
    }

    pub fn from_config(
        catalog: Arc<dyn CatalogSource>,
        config: &ResolvedConfig,
        prefs: Preferences,
    ) -> Self {
        Self {
            prefs,
            items_per_page: config.items_per_page,
            download_dir: config.download_dir.clone(),
            ..Self::new(catalog)
        }
    }

    pub fn route(&self) -> Route {
        self.page.route()
    }

    /// Replace the current page with the one for `route`. The old page (and
    /// any result still addressed to it) is dropped.
    pub fn open(&mut self, route: &Route, label: Option<String>) -> Option<FetchRequest> {
        let (mut page, fetch) = Page::open(route, self.items_per_page);
        if let Some(rows) = self.page_capacity {
            page.fit(rows);
        }
        self.page = page;
        self.label = label;
        fetch
    }

    /// Hard reset: same catalog and settings, empty history, welcome page.
    pub fn reset(&mut self) {
        self.page = Page::Welcome;
        self.history.clear();
        self.label = None;
        self.status_message = WELCOME_STATUS.to_string();
    }

    /// Breadcrumb trail, root first: history routes followed by the current one.
    pub fn breadcrumbs(&self) -> Vec<String> {
        self.history
            .iter()
            .map(|entry| crumb(&entry.route, entry.label.as_deref()))
            .chain(std::iter::once(crumb(&self.route(), self.label.as_deref())))
            .collect()
    }
}

fn crumb(route: &Route, label: Option<&str>) -> String {
    match (route, label) {
        (_, Some(label)) => label.to_string(),
        (Route::Welcome, None) => "Home".to_string(),
        (Route::Levels, None) => "Levels".to_string(),
        (Route::Formations { .. }, None) => "Formations".to_string(),
        (Route::Modules { .. }, None) => "Modules".to_string(),
        (Route::Courses { .. }, None) => "Courses".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Id;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, WELCOME_STATUS);
        assert_eq!(app.route(), Route::Welcome);
        assert!(app.history.is_empty());
        assert_eq!(app.items_per_page, DEFAULT_ITEMS_PER_PAGE);
    }

    #[test]
    fn test_breadcrumbs_prefer_labels() {
        let mut app = test_app();
        app.history.push(HistoryEntry {
            route: Route::Welcome,
            label: None,
        });
        app.history.push(HistoryEntry {
            route: Route::Levels,
            label: None,
        });
        app.open(
            &Route::Formations {
                year_id: Id::parse("1"),
            },
            Some("1ère année".to_string()),
        );
        assert_eq!(app.breadcrumbs(), vec!["Home", "Levels", "1ère année"]);
    }

    #[test]
    fn test_reset_returns_home() {
        let mut app = test_app();
        app.open(&Route::Levels, None);
        app.history.push(HistoryEntry {
            route: Route::Welcome,
            label: None,
        });
        app.status_message = "Downloading".to_string();

        app.reset();
        assert_eq!(app.route(), Route::Welcome);
        assert!(app.history.is_empty());
        assert_eq!(app.status_message, WELCOME_STATUS);
    }
}
