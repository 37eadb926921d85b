//! # Catalog API
//!
//! Everything that talks to the network: the HTTP gateway, the typed
//! endpoints built on it, and the file downloader.

pub mod catalog;
pub mod client;
pub mod download;
pub mod types;

pub use catalog::CatalogSource;
pub use client::{ApiClient, ApiError, ApiErrorKind};
pub use types::{CourseResource, ExamSet, Formation, Id, Module, ResourceKind, Year};
