//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: app name, breadcrumbs, status, theme indicator
//! - `LandingPage`: welcome screen
//! - `Spinner`, `ErrorMessage`, `EmptyState`: the non-list page views
//! - `Recovery`: fallback after a render panic
//!
//! ### Transient Wrappers Over Persistent State
//!
//! Created each frame, borrowing props plus a `&mut` slice of TUI state
//! they write layout results into:
//! - `PaginatedList`: cards for one page, records card hit rectangles
//! - `ResourceTabs`: the courses tab strip, records tab hit rectangles
//!
//! ### Co-location of Concerns
//!
//! Each component file contains its props, rendering logic and tests.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs
//! ├── landing.rs
//! ├── spinner.rs
//! ├── error_message.rs
//! ├── empty_state.rs
//! ├── paginated_list.rs  (ListEntry trait, hit testing)
//! ├── tabs.rs
//! ├── tilt.rs            (pointer-relative card tilt)
//! └── recovery.rs
//! ```

pub mod empty_state;
pub mod error_message;
pub mod landing;
pub mod paginated_list;
pub mod recovery;
pub mod spinner;
pub mod tabs;
pub mod tilt;
pub mod title_bar;

pub use empty_state::EmptyState;
pub use error_message::ErrorMessage;
pub use landing::LandingPage;
pub use paginated_list::{ListEntry, PaginatedList, hit_test};
pub use recovery::Recovery;
pub use spinner::Spinner;
pub use tabs::ResourceTabs;
pub use title_bar::TitleBar;
