//! # Pages
//!
//! One variant per route. Each list page exclusively owns its `Resource`
//! and cursor; nothing is shared between pages and nothing survives
//! navigation, so every visit re-fetches.
//!
//! ```text
//! Page
//! ├── Welcome
//! ├── Levels(ListPage<(), Year>)
//! ├── Formations(ListPage<Id, Formation>)       key: yearId
//! ├── Modules(ListPage<Id, Module>)             key: formationId
//! └── Courses(CoursesPage)                      key: (moduleId, tab)
//! ```

use std::ops::Range;

use log::debug;

use crate::api::{
    ApiError, CourseResource, Formation, Id, Module, ResourceKind, Year,
    types::{non_blank, sort_years},
};
use crate::core::download::DownloadRequest;
use crate::core::fetch::{FetchRequest, Payload, Query};
use crate::core::resource::{FailurePolicy, Resource, Ticket};
use crate::core::route::Route;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 5;
pub const SITE_NAME: &str = "OFPPT Cours";

/// Full window title for `page`.
pub fn page_title(page: &Page) -> String {
    format!("{} | {SITE_NAME}", page.title())
}

/// Cursor over a paginated list. The cursor is an absolute item index; the
/// visible page is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    cursor: usize,
    per_page: usize,
    /// Configured page size; `per_page` never exceeds it.
    limit: usize,
}

impl Selection {
    pub fn new(per_page: usize) -> Self {
        let per_page = per_page.max(1);
        Self {
            cursor: 0,
            per_page,
            limit: per_page,
        }
    }

    /// Shrink pages to the `rows` cards the screen can show. Growing back is
    /// capped at the configured size. The cursor stays on the same item.
    pub fn fit(&mut self, rows: usize) {
        self.per_page = self.limit.min(rows.max(1));
    }

    pub fn fitted(mut self, rows: usize) -> Self {
        self.fit(rows);
        self
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn page(&self) -> usize {
        self.cursor / self.per_page
    }

    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.per_page)
    }

    /// Item indices visible on the current page.
    pub fn page_range(&self, len: usize) -> Range<usize> {
        let start = (self.page() * self.per_page).min(len);
        let end = (start + self.per_page).min(len);
        start..end
    }

    pub fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn next_page(&mut self, len: usize) {
        let page = self.page();
        if page + 1 < self.page_count(len) {
            self.cursor = (page + 1) * self.per_page;
        }
    }

    pub fn prev_page(&mut self) {
        let page = self.page();
        if page > 0 {
            self.cursor = (page - 1) * self.per_page;
        }
    }

    /// Jump to `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize, len: usize) -> bool {
        if index < len {
            self.cursor = index;
            true
        } else {
            false
        }
    }

    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

/// A fetched list plus the cursor moving over it.
pub struct ListPage<K, T> {
    pub resource: Resource<K, T>,
    pub selection: Selection,
}

impl<K, T> ListPage<K, T>
where
    K: Clone + std::fmt::Debug,
{
    pub fn new(policy: FailurePolicy, per_page: usize) -> Self {
        Self {
            resource: Resource::new(policy),
            selection: Selection::new(per_page),
        }
    }

    pub fn load(&mut self, key: Option<K>) -> Option<Ticket<K>> {
        self.selection.reset();
        self.resource.load(key)
    }

    pub fn reload(&mut self) -> Option<Ticket<K>> {
        self.selection.reset();
        self.resource.reload()
    }

    pub fn settle(&mut self, generation: u64, result: Result<Vec<T>, ApiError>) -> bool {
        let applied = self.resource.settle(generation, result);
        if applied {
            self.selection.clamp(self.resource.items().len());
        }
        applied
    }

    pub fn items(&self) -> &[T] {
        self.resource.items()
    }

    pub fn selected(&self) -> Option<&T> {
        self.items().get(self.selection.cursor())
    }

    fn cursor_parts(&mut self) -> (&mut Selection, usize) {
        let len = self.resource.items().len();
        (&mut self.selection, len)
    }
}

/// Module resources, partitioned by the active tab.
pub struct CoursesPage {
    pub module_id: Option<Id>,
    pub tab: ResourceKind,
    pub list: ListPage<(Id, ResourceKind), CourseResource>,
}

impl CoursesPage {
    fn new(module_id: Option<Id>, per_page: usize) -> Self {
        let tab = ResourceKind::default();
        Self {
            module_id,
            tab,
            list: ListPage::new(FailurePolicy::for_kind(tab), per_page),
        }
    }

    /// Point the list at `tab` and start a fresh cycle.
    fn load_tab(&mut self, tab: ResourceKind) -> Option<FetchRequest> {
        self.tab = tab;
        self.list.resource.set_policy(FailurePolicy::for_kind(tab));
        let key = self.module_id.clone().map(|id| (id, tab));
        self.list.load(key).map(resources_request)
    }
}

/// What activating the selected item does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Go one level deeper. `label` is a breadcrumb hint only.
    Navigate { route: Route, label: Option<String> },
    Download(DownloadRequest),
    Nothing,
}

pub enum Page {
    Welcome,
    Levels(ListPage<(), Year>),
    Formations(ListPage<Id, Formation>),
    Modules(ListPage<Id, Module>),
    Courses(CoursesPage),
}

/// Breadcrumb hint: the first non-blank name, if any.
fn crumb_label(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .copied()
        .find_map(non_blank)
        .map(str::to_string)
}

fn years_request(ticket: Ticket<()>) -> FetchRequest {
    FetchRequest {
        generation: ticket.generation,
        query: Query::Years,
    }
}

fn formations_request(ticket: Ticket<Id>) -> FetchRequest {
    FetchRequest {
        generation: ticket.generation,
        query: Query::Formations(ticket.key),
    }
}

fn modules_request(ticket: Ticket<Id>) -> FetchRequest {
    FetchRequest {
        generation: ticket.generation,
        query: Query::Modules(ticket.key),
    }
}

fn resources_request(ticket: Ticket<(Id, ResourceKind)>) -> FetchRequest {
    let (module, kind) = ticket.key;
    FetchRequest {
        generation: ticket.generation,
        query: Query::Resources(module, kind),
    }
}

impl Page {
    /// Build the page for `route` and start its first fetch cycle.
    pub fn open(route: &Route, per_page: usize) -> (Page, Option<FetchRequest>) {
        match route {
            Route::Welcome => (Page::Welcome, None),
            Route::Levels => {
                let mut list = ListPage::new(FailurePolicy::Surface, per_page);
                let fetch = list.load(Some(())).map(years_request);
                (Page::Levels(list), fetch)
            }
            Route::Formations { year_id } => {
                let mut list = ListPage::new(FailurePolicy::Surface, per_page);
                let fetch = list.load(year_id.clone()).map(formations_request);
                (Page::Formations(list), fetch)
            }
            Route::Modules { formation_id } => {
                let mut list = ListPage::new(FailurePolicy::Surface, per_page);
                let fetch = list.load(formation_id.clone()).map(modules_request);
                (Page::Modules(list), fetch)
            }
            Route::Courses { module_id } => {
                let mut page = CoursesPage::new(module_id.clone(), per_page);
                let fetch = page.load_tab(page.tab);
                (Page::Courses(page), fetch)
            }
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Page::Welcome => Route::Welcome,
            Page::Levels(_) => Route::Levels,
            Page::Formations(list) => Route::Formations {
                year_id: list.resource.key().cloned(),
            },
            Page::Modules(list) => Route::Modules {
                formation_id: list.resource.key().cloned(),
            },
            Page::Courses(page) => Route::Courses {
                module_id: page.module_id.clone(),
            },
        }
    }

    /// Restart the current fetch cycle with the same key.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        match self {
            Page::Welcome => None,
            Page::Levels(list) => list.reload().map(years_request),
            Page::Formations(list) => list.reload().map(formations_request),
            Page::Modules(list) => list.reload().map(modules_request),
            Page::Courses(page) => page.list.reload().map(resources_request),
        }
    }

    /// Switch the courses tab. Re-selecting the active tab does nothing.
    pub fn select_tab(&mut self, tab: ResourceKind) -> Option<FetchRequest> {
        match self {
            Page::Courses(page) if page.tab != tab => page.load_tab(tab),
            _ => None,
        }
    }

    pub fn tab(&self) -> Option<ResourceKind> {
        match self {
            Page::Courses(page) => Some(page.tab),
            _ => None,
        }
    }

    /// Route a fetch result to this page's resource. Returns `false` when the
    /// result was stale or addressed to a different kind of page.
    pub fn settle(&mut self, generation: u64, result: Result<Payload, ApiError>) -> bool {
        match (self, result) {
            (Page::Levels(list), Ok(Payload::Years(mut years))) => {
                sort_years(&mut years);
                list.settle(generation, Ok(years))
            }
            (Page::Levels(list), Err(e)) => list.settle(generation, Err(e)),
            (Page::Formations(list), Ok(Payload::Formations(items))) => {
                list.settle(generation, Ok(items))
            }
            (Page::Formations(list), Err(e)) => list.settle(generation, Err(e)),
            (Page::Modules(list), Ok(Payload::Modules(items))) => {
                list.settle(generation, Ok(items))
            }
            (Page::Modules(list), Err(e)) => list.settle(generation, Err(e)),
            (Page::Courses(page), Ok(Payload::Resources(items))) => {
                page.list.settle(generation, Ok(items))
            }
            (Page::Courses(page), Err(e)) => page.list.settle(generation, Err(e)),
            (_, Ok(payload)) => {
                debug!(
                    "Dropping {} item(s) for generation {}: page changed",
                    payload.len(),
                    generation
                );
                false
            }
            (Page::Welcome, Err(_)) => false,
        }
    }

    pub fn is_loading(&self) -> bool {
        match self {
            Page::Welcome => false,
            Page::Levels(list) => list.resource.is_loading(),
            Page::Formations(list) => list.resource.is_loading(),
            Page::Modules(list) => list.resource.is_loading(),
            Page::Courses(page) => page.list.resource.is_loading(),
        }
    }

    fn cursor_parts(&mut self) -> Option<(&mut Selection, usize)> {
        match self {
            Page::Welcome => None,
            Page::Levels(list) => Some(list.cursor_parts()),
            Page::Formations(list) => Some(list.cursor_parts()),
            Page::Modules(list) => Some(list.cursor_parts()),
            Page::Courses(page) => Some(page.list.cursor_parts()),
        }
    }

    pub fn selection(&self) -> Option<Selection> {
        match self {
            Page::Welcome => None,
            Page::Levels(list) => Some(list.selection),
            Page::Formations(list) => Some(list.selection),
            Page::Modules(list) => Some(list.selection),
            Page::Courses(page) => Some(page.list.selection),
        }
    }

    pub fn cursor_up(&mut self) {
        if let Some((selection, _)) = self.cursor_parts() {
            selection.up();
        }
    }

    pub fn cursor_down(&mut self) {
        if let Some((selection, len)) = self.cursor_parts() {
            selection.down(len);
        }
    }

    pub fn next_page(&mut self) {
        if let Some((selection, len)) = self.cursor_parts() {
            selection.next_page(len);
        }
    }

    pub fn prev_page(&mut self) {
        if let Some((selection, _)) = self.cursor_parts() {
            selection.prev_page();
        }
    }

    /// Match the page size to the number of cards that fit on screen.
    pub fn fit(&mut self, rows: usize) {
        if let Some((selection, _)) = self.cursor_parts() {
            selection.fit(rows);
        }
    }

    pub fn select(&mut self, index: usize) -> bool {
        self.cursor_parts()
            .is_some_and(|(selection, len)| selection.select(index, len))
    }

    /// Resolve the selected item into the next step.
    pub fn activate(&self) -> Activation {
        match self {
            Page::Welcome => Activation::Navigate {
                route: Route::Levels,
                label: None,
            },
            Page::Levels(list) => match list.selected() {
                Some(year) => Activation::Navigate {
                    route: Route::Formations {
                        year_id: Some(year.id.clone()),
                    },
                    label: crumb_label(&[Some(year.name.as_str())]),
                },
                None => Activation::Nothing,
            },
            Page::Formations(list) => match list.selected() {
                Some(formation) => Activation::Navigate {
                    route: Route::Modules {
                        formation_id: Some(formation.id.clone()),
                    },
                    label: crumb_label(&[Some(formation.name.as_str()), formation.code.as_deref()]),
                },
                None => Activation::Nothing,
            },
            Page::Modules(list) => match list.selected() {
                Some(module) => Activation::Navigate {
                    route: Route::Courses {
                        module_id: Some(module.id.clone()),
                    },
                    label: crumb_label(&[Some(module.name.as_str())]),
                },
                None => Activation::Nothing,
            },
            Page::Courses(page) => page
                .list
                .selected()
                .and_then(DownloadRequest::for_resource)
                .map(Activation::Download)
                .unwrap_or(Activation::Nothing),
        }
    }

    /// Document title for this page, without the site suffix.
    pub fn title(&self) -> String {
        fn param(id: Option<&Id>) -> String {
            id.map(|id| format!(" {id}")).unwrap_or_default()
        }
        match self {
            Page::Welcome => "Welcome".to_string(),
            Page::Levels(_) => "Education Levels".to_string(),
            Page::Formations(list) => format!("Formations - Year{}", param(list.resource.key())),
            Page::Modules(list) => format!("Modules - Formation{}", param(list.resource.key())),
            Page::Courses(page) => format!(
                "{} - Module{}",
                page.tab.heading(),
                param(page.module_id.as_ref())
            ),
        }
    }
}
