//! # Fetch Requests
//!
//! A `FetchRequest` is what a page asks the event loop to go and get. It is
//! plain data so `update()` can stay pure; the loop calls [`Query::run`] in a
//! background task and feeds the [`Payload`] back as `Action::Fetched`.

use crate::api::{
    ApiError, CatalogSource, CourseResource, Formation, Id, Module, ResourceKind, Year,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Years,
    Formations(Id),
    Modules(Id),
    Resources(Id, ResourceKind),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Years(Vec<Year>),
    Formations(Vec<Formation>),
    Modules(Vec<Module>),
    Resources(Vec<CourseResource>),
}

impl Payload {
    pub fn len(&self) -> usize {
        match self {
            Payload::Years(v) => v.len(),
            Payload::Formations(v) => v.len(),
            Payload::Modules(v) => v.len(),
            Payload::Resources(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A query tagged with the generation of the resource that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub query: Query,
}

impl Query {
    pub async fn run(&self, source: &dyn CatalogSource) -> Result<Payload, ApiError> {
        match self {
            Query::Years => source.years().await.map(Payload::Years),
            Query::Formations(year) => source.formations(year).await.map(Payload::Formations),
            Query::Modules(formation) => source.modules(formation).await.map(Payload::Modules),
            Query::Resources(module, kind) => {
                source.resources(module, *kind).await.map(Payload::Resources)
            }
        }
    }
}
