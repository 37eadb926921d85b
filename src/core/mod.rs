//! # Core Application Logic
//!
//! This module contains the browsing logic for Cours.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No network. No UI.     │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                     ┌──────────┴──────────┐
//!                     ▼                     ▼
//!              ┌────────────┐        ┌────────────┐
//!              │    TUI     │───────▶│    API     │
//!              │  Adapter   │ spawn  │  (reqwest) │
//!              │ (ratatui)  │        │            │
//!              └────────────┘        └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`page`]: One variant per route, each owning its list resource
//! - [`resource`]: Generic fetch lifecycle with the stale-result guard
//! - [`route`]: Parsing and printing of URL-shaped addresses
//! - [`fetch`]: What a page asks the event loop to fetch
//! - [`download`]: Download eligibility and file naming
//! - [`prefs`]: Persisted theme preferences
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod download;
pub mod fetch;
pub mod page;
pub mod prefs;
pub mod resource;
pub mod route;
pub mod state;
