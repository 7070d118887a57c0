//! Nomflix - terminal movie & TV browser
//!
//! A Netflix-style navigation header over TMDB listings: the bar turns
//! opaque once the page scrolls, a search field slides out of the icon and
//! closes on outside clicks, and a marker glides under the active route.
//!
//! # Modules
//!
//! - `models` - Media items and loading state
//! - `api` - TMDB client
//! - `router` - Location, history and path matching
//! - `events` - Document-level click listeners
//! - `ui` - TUI components (header, pages, theme, motion)
//! - `app` - Application state and input handling
//! - `config` - Config file and environment
//! - `cli` / `commands` - Scripting interface

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod events;
pub mod models;
pub mod router;
pub mod ui;

// Re-export commonly used types
pub use api::{TmdbClient, TmdbError};
pub use app::{App, FetchRequest, FetchResult};
pub use config::Config;
pub use events::{ClickEvent, Document, ListenerId};
pub use models::{LoadingState, MediaItem, MediaType};
pub use router::{Location, Route, Router};
pub use ui::{Header, HeaderConfig, NavigationMode, SearchPanelState};
