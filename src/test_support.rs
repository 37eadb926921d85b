//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::api::catalog::{exams_path, formations_path, modules_path, resources_path, years_path};
use crate::api::{
    ApiError, ApiErrorKind, CatalogSource, CourseResource, ExamSet, Formation, Id, Module,
    ResourceKind, Year,
};
use crate::core::route::Route;
use crate::core::state::App;

type Reply = Result<Value, ApiError>;

/// In-memory catalog keyed by request path.
///
/// Each path holds a queue of replies. Replies are consumed in order and the
/// last one repeats, so `fail` followed by `respond` models "fails once, then
/// recovers". Unknown paths answer with a 404.
#[derive(Default)]
pub struct FakeCatalog {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, path: impl Into<String>, payload: Value) -> Self {
        self.push(path.into(), Ok(payload));
        self
    }

    pub fn fail(self, path: impl Into<String>, error: ApiError) -> Self {
        self.push(path.into(), Err(error));
        self
    }

    fn push(&self, path: String, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(path)
            .or_default()
            .push_back(reply);
    }

    /// Every path requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn reply(&self, path: String) -> Reply {
        self.calls.lock().unwrap().push(path.clone());
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(&path) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap(),
            None => Err(ApiError::new(
                ApiErrorKind::Status,
                "Request failed with status code 404",
            )),
        }
    }

    fn get<T: DeserializeOwned>(&self, path: String) -> Result<T, ApiError> {
        let value = self.reply(path)?;
        serde_json::from_value(value)
            .map_err(|_| ApiError::new(ApiErrorKind::Format, "Invalid API response format"))
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    fn name(&self) -> &str {
        "fake"
    }

    async fn years(&self) -> Result<Vec<Year>, ApiError> {
        self.get(years_path())
    }

    async fn formations(&self, year: &Id) -> Result<Vec<Formation>, ApiError> {
        self.get(formations_path(year))
    }

    async fn modules(&self, formation: &Id) -> Result<Vec<Module>, ApiError> {
        self.get(modules_path(formation))
    }

    async fn resources(
        &self,
        module: &Id,
        kind: ResourceKind,
    ) -> Result<Vec<CourseResource>, ApiError> {
        self.get(resources_path(module, kind))
    }

    async fn exams(&self, course: &Id) -> Result<ExamSet, ApiError> {
        self.get(exams_path(course))
    }
}

pub fn timeout_error() -> ApiError {
    ApiError::new(ApiErrorKind::Timeout, "timeout of 10000ms exceeded")
}

pub fn years_json() -> Value {
    json!([
        { "id": 2, "name": "2ème année", "order": 2 },
        { "id": 1, "name": "1ère année", "order": 1 }
    ])
}

pub fn modules_json() -> Value {
    json!([
        { "id": 31, "name": "Programmation orientée objet", "code": "M103" },
        { "id": 32, "name": "Bases de données", "code": "M104" }
    ])
}

pub fn formations_route(year: &str) -> Route {
    Route::Formations {
        year_id: Some(Id::parse(year).unwrap()),
    }
}

pub fn modules_route(formation: &str) -> Route {
    Route::Modules {
        formation_id: Some(Id::parse(formation).unwrap()),
    }
}

pub fn courses_route(module: &str) -> Route {
    Route::Courses {
        module_id: Some(Id::parse(module).unwrap()),
    }
}

/// Creates a test App over an empty fake catalog.
pub fn test_app() -> App {
    App::new(Arc::new(FakeCatalog::new()))
}

/// Creates a test App over `catalog`, keeping a handle for call assertions.
pub fn test_app_with(catalog: FakeCatalog) -> (App, Arc<FakeCatalog>) {
    let catalog = Arc::new(catalog);
    (App::new(catalog.clone()), catalog)
}
