//! # Resource Lifecycle
//!
//! One generic fetch/view-state machine shared by every page.
//!
//! ```text
//!            load(None)                 load(Some(k)) / reload()
//!   ┌──────────────────────┐        ┌─────────────────────────┐
//!   ▼                      │        ▼                         │
//! Idle ──── load(Some(k)) ───────▶ Loading ──settle(Ok)──▶ Ready(items)
//!                                   │
//!                                   └──settle(Err)──▶ Failed(msg)   (Surface)
//!                                                └──▶ Ready([])     (Suppress)
//! ```
//!
//! Every `load` stamps a fresh generation. `settle` applies a result only if
//! it carries the current generation and the resource is still `Loading`,
//! so a late answer for a superseded key is dropped instead of overwriting
//! the newer one.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};

use crate::api::{ApiError, ResourceKind};

// Process-wide so a result addressed to a page that has since been replaced
// can never match the generation of its successor.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    /// No governing key yet; nothing requested.
    Idle,
    Loading,
    Ready(Vec<T>),
    Failed(String),
}

/// What happens to a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Show the error view.
    Surface,
    /// Log it and show the empty view instead.
    Suppress,
}

impl FailurePolicy {
    /// Lessons surface their errors; controls and exams degrade to "nothing here yet".
    pub fn for_kind(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Cours => FailurePolicy::Surface,
            ResourceKind::Controls | ResourceKind::Efm => FailurePolicy::Suppress,
        }
    }
}

/// Proof that a request was started for `key` under `generation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    pub generation: u64,
    pub key: K,
}

/// The four mutually exclusive things a page can show, in precedence order.
#[derive(Debug, PartialEq)]
pub enum View<'a, T> {
    Loading,
    Error(&'a str),
    Empty,
    List(&'a [T]),
}

pub struct Resource<K, T> {
    key: Option<K>,
    state: ResourceState<T>,
    generation: u64,
    policy: FailurePolicy,
}

impl<K, T> Resource<K, T>
where
    K: Clone + fmt::Debug,
{
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            key: None,
            state: ResourceState::Idle,
            generation: 0,
            policy,
        }
    }

    /// Start a fetch cycle for `key`. `None` parks the resource in `Idle`
    /// and returns no ticket, so no request is issued.
    pub fn load(&mut self, key: Option<K>) -> Option<Ticket<K>> {
        self.generation = next_generation();
        self.key = key.clone();
        match key {
            None => {
                debug!("Resource idle (no key), generation {}", self.generation);
                self.state = ResourceState::Idle;
                None
            }
            Some(key) => {
                debug!("Resource loading {:?}, generation {}", key, self.generation);
                self.state = ResourceState::Loading;
                Some(Ticket {
                    generation: self.generation,
                    key,
                })
            }
        }
    }

    /// Restart the cycle for the current key.
    pub fn reload(&mut self) -> Option<Ticket<K>> {
        self.load(self.key.clone())
    }

    /// Apply a fetch result. Returns `false` if it was stale and discarded.
    pub fn settle(&mut self, generation: u64, result: Result<Vec<T>, ApiError>) -> bool {
        if generation != self.generation || !self.is_loading() {
            debug!(
                "Discarding stale result (generation {}, current {})",
                generation, self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(items) => ResourceState::Ready(items),
            Err(e) => match self.policy {
                FailurePolicy::Surface => {
                    warn!("Fetch for {:?} failed: {} ({:?})", self.key, e, e.kind);
                    ResourceState::Failed(e.to_string())
                }
                FailurePolicy::Suppress => {
                    warn!("Fetch for {:?} failed, showing empty: {} ({:?})", self.key, e, e.kind);
                    ResourceState::Ready(Vec::new())
                }
            },
        };
        true
    }

    pub fn set_policy(&mut self, policy: FailurePolicy) {
        self.policy = policy;
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub fn state(&self) -> &ResourceState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ResourceState::Loading)
    }

    /// Loaded items; empty unless `Ready`.
    pub fn items(&self) -> &[T] {
        match &self.state {
            ResourceState::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn view(&self) -> View<'_, T> {
        match &self.state {
            ResourceState::Loading => View::Loading,
            ResourceState::Failed(msg) => View::Error(msg),
            ResourceState::Idle => View::Empty,
            ResourceState::Ready(items) if items.is_empty() => View::Empty,
            ResourceState::Ready(items) => View::List(items),
        }
    }
}
