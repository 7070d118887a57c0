//! Data structures shared by the page views, the API client and the CLI
//!
//! - **Media**: TMDB listing entries (movies and TV shows)
//! - **Loading**: per-page async fetch state

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Media Models (TMDB)
// =============================================================================

/// Media type discriminator for listing entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// Short badge shown next to a title
    pub fn badge(&self) -> &'static str {
        match self {
            MediaType::Movie => "MOVIE",
            MediaType::Tv => "TV",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Tv => write!(f, "TV Show"),
        }
    }
}

/// One movie or TV show as listed on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub year: Option<u16>,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f32,
}

impl fmt::Display for MediaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year.map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} [{}]", self.title, year_str, self.media_type)
    }
}

// =============================================================================
// Loading State
// =============================================================================

/// Loading state for async page fetches
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// Nothing requested yet, or the last fetch finished
    #[default]
    Idle,
    /// Fetch in flight
    Loading,
    /// Last fetch failed
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}
