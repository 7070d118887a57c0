//! URL routing
//!
//! Maps the current location to one of the page views and answers
//! exact / prefix match queries for the navigation header.

use log::info;
use std::fmt;

// =============================================================================
// Location
// =============================================================================

/// Parsed location: normalized path plus raw query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
}

impl Location {
    /// Parse `"/search?keyword=dune"` style URLs.
    ///
    /// The path always starts with `/`; a trailing slash is dropped except
    /// for the root itself.
    pub fn parse(url: &str) -> Self {
        let (path, query) = match url.split_once('?') {
            Some((p, q)) => (p, Some(q.to_string()).filter(|q| !q.is_empty())),
            None => (url, None),
        };

        let trimmed = path.trim().trim_end_matches('/');
        let path = if trimmed.is_empty() {
            "/".to_string()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };

        Self { path, query }
    }

    /// Decoded value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query.as_deref()?.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key != name {
                return None;
            }
            let value = value.replace('+', " ");
            urlencoding::decode(&value).ok().map(|v| v.into_owned())
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.query {
            Some(q) => write!(f, "{}?{}", self.path, q),
            None => write!(f, "{}", self.path),
        }
    }
}

// =============================================================================
// Matching
// =============================================================================

/// Result of matching a pattern against the current path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The matched portion of the path
    pub url: String,
    /// Whether the whole path was consumed
    pub is_exact: bool,
}

/// Prefix-match `pattern` against `path` on segment boundaries.
///
/// `/` matches every path; `/tv` matches `/tv` and `/tv/detail/42` but not
/// `/tvshows`.
pub fn match_path(pattern: &str, path: &str) -> Option<RouteMatch> {
    let pattern = Location::parse(pattern).path;
    let path = Location::parse(path).path;

    if pattern == "/" {
        return Some(RouteMatch {
            url: "/".to_string(),
            is_exact: path == "/",
        });
    }

    let rest = path.strip_prefix(pattern.as_str())?;
    if !rest.is_empty() && !rest.starts_with('/') {
        return None;
    }

    Some(RouteMatch {
        url: pattern,
        is_exact: rest.is_empty(),
    })
}

// =============================================================================
// Routes
// =============================================================================

/// Page views reachable by URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Tv,
    Search,
}

impl Route {
    /// Route table in evaluation order; the first prefix match wins
    pub const TABLE: [(&'static str, Route); 3] = [
        ("/tv", Route::Tv),
        ("/search", Route::Search),
        ("/", Route::Home),
    ];

    /// Resolve a path against the route table
    pub fn resolve(path: &str) -> Route {
        Self::TABLE
            .iter()
            .find(|(pattern, _)| match_path(pattern, path).is_some())
            .map(|(_, route)| *route)
            .unwrap_or(Route::Home)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "NOW PLAYING",
            Route::Tv => "POPULAR TV",
            Route::Search => "SEARCH",
        }
    }
}

// =============================================================================
// Router
// =============================================================================

/// Current location plus back-history
#[derive(Debug, Clone)]
pub struct Router {
    location: Location,
    history: Vec<Location>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Router {
    pub fn new(url: &str) -> Self {
        Self {
            location: Location::parse(url),
            history: Vec::new(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn route(&self) -> Route {
        Route::resolve(&self.location.path)
    }

    /// Match a pattern against the current path
    pub fn route_match(&self, pattern: &str) -> Option<RouteMatch> {
        match_path(pattern, &self.location.path)
    }

    pub fn query_param(&self, name: &str) -> Option<String> {
        self.location.query_param(name)
    }

    /// Navigate to `url`; returns false if already there
    pub fn navigate(&mut self, url: &str) -> bool {
        let next = Location::parse(url);
        if next == self.location {
            return false;
        }
        info!("Route change: {} -> {}", self.location, next);
        let prev = std::mem::replace(&mut self.location, next);
        self.history.push(prev);
        true
    }

    /// Go back to the previous location
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(prev) => {
                info!("Route back: {} -> {}", self.location, prev);
                self.location = prev;
                true
            }
            None => false,
        }
    }
}

/// Build the search page URL for a keyword
pub fn search_url(keyword: &str) -> String {
    format!("/search?keyword={}", urlencoding::encode(keyword.trim()))
}
