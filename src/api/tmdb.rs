//! TMDB (The Movie Database) API client
//!
//! Provides the listings behind every page view.
//! API docs: https://developer.themoviedb.org/docs

use anyhow::Result;
use log::{debug, warn};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::{MediaItem, MediaType};

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Invalid API key (401)")]
    Unauthorized,

    #[error("Rate limited (429), retries exhausted")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// TMDB API client
#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    language: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl TmdbClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.themoviedb.org/3";

    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            language: "en-US".to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            max_retries: 3,
        }
    }

    /// Override the response language (e.g. "ko-KR")
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// GET with the api key attached, retrying rate-limited responses
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut retries = 0;

        loop {
            debug!("TMDB GET {}", endpoint);
            let response = self
                .client
                .get(&url)
                .query(&[("api_key", self.api_key.as_str()), ("language", self.language.as_str())])
                .query(params)
                .header("Accept", "application/json")
                .send()
                .await
                .map_err(TmdbError::from)?;

            match response.status() {
                StatusCode::OK => {
                    let body = response.text().await.map_err(TmdbError::from)?;
                    let parsed: T = serde_json::from_str(&body).map_err(|e| {
                        TmdbError::InvalidResponse(format!("JSON parse error: {}", e))
                    })?;
                    return Ok(parsed);
                }
                StatusCode::NOT_FOUND => {
                    return Err(TmdbError::NotFound.into());
                }
                StatusCode::UNAUTHORIZED => {
                    return Err(TmdbError::Unauthorized.into());
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    retries += 1;
                    if retries >= self.max_retries {
                        return Err(TmdbError::RateLimited.into());
                    }

                    let wait_secs = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(2u64.pow(retries));

                    warn!("TMDB rate limited, retrying in {}s ({}/{})", wait_secs, retries, self.max_retries);
                    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
                    continue;
                }
                status => {
                    return Err(TmdbError::ServerError(status.as_u16()).into());
                }
            }
        }
    }

    /// Movies currently in theaters (home page)
    pub async fn now_playing(&self) -> Result<Vec<MediaItem>> {
        let response: ListResponse = self.get("/movie/now_playing", &[("page", "1")]).await?;
        Ok(response.into_items(Some(MediaType::Movie)))
    }

    /// Popular TV shows (tv page)
    pub async fn popular_tv(&self) -> Result<Vec<MediaItem>> {
        let response: ListResponse = self.get("/tv/popular", &[("page", "1")]).await?;
        Ok(response.into_items(Some(MediaType::Tv)))
    }

    /// Search movies and TV shows; people are dropped
    pub async fn search(&self, query: &str) -> Result<Vec<MediaItem>> {
        let response: ListResponse = self
            .get("/search/multi", &[("query", query), ("page", "1")])
            .await?;
        Ok(response.into_items(None))
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ListResponse {
    results: Vec<ListEntryRaw>,
}

impl ListResponse {
    /// `fallback` types entries from single-type endpoints, which omit `media_type`
    fn into_items(self, fallback: Option<MediaType>) -> Vec<MediaItem> {
        self.results
            .into_iter()
            .filter_map(|r| r.into_item(fallback))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ListEntryRaw {
    id: u64,
    media_type: Option<String>,
    // Movies use "title", TV uses "name"
    title: Option<String>,
    name: Option<String>,
    // Movies use "release_date", TV uses "first_air_date"
    release_date: Option<String>,
    first_air_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f32>,
}

impl ListEntryRaw {
    fn into_item(self, fallback: Option<MediaType>) -> Option<MediaItem> {
        let media_type = match self.media_type.as_deref() {
            Some("movie") => MediaType::Movie,
            Some("tv") => MediaType::Tv,
            Some(_) => return None,
            None => fallback?,
        };

        let title = self.title.or(self.name).unwrap_or_default();
        let year = self
            .release_date
            .or(self.first_air_date)
            .and_then(|d| extract_year(&d));

        Some(MediaItem {
            id: self.id,
            media_type,
            title,
            year,
            overview: self.overview.unwrap_or_default(),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            vote_average: self.vote_average.unwrap_or(0.0),
        })
    }
}

/// Extract year from a date string like "2022-03-04"
fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}
