//! Terminal UI components
//!
//! Built with ratatui. The header is persistent across routes; the page
//! views below it are swapped by the router.

pub mod browser;
pub mod header;
pub mod motion;
pub mod pages;
pub mod search;
pub mod theme;

pub use header::{Header, HeaderConfig, NavigationMode, SearchPanelState};
pub use theme::{Palette, Role};
