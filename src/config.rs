//! Configuration management for Nomflix
//!
//! Config is stored at ~/.config/nomflix/config.toml. Every field is
//! optional; a missing file means defaults. An unreadable or invalid file
//! is reported to the caller, which falls back to defaults once it has
//! somewhere to log the problem.

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ui::HeaderConfig;

/// Header tuning section (`[header]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderSettings {
    /// Scroll offset (units) above which the bar turns opaque
    pub scroll_threshold: u32,
    /// Scroll units per list row / wheel notch
    pub scroll_step: u32,
    pub background_duration_ms: u64,
    pub search_duration_ms: u64,
    pub marker_duration_ms: u64,
}

impl Default for HeaderSettings {
    fn default() -> Self {
        Self {
            scroll_threshold: 250,
            scroll_step: 100,
            background_duration_ms: 300,
            search_duration_ms: 300,
            marker_duration_ms: 300,
        }
    }
}

impl HeaderSettings {
    pub fn header_config(&self) -> HeaderConfig {
        HeaderConfig {
            scroll_threshold: self.scroll_threshold,
            background_duration: Duration::from_millis(self.background_duration_ms),
            search_duration: Duration::from_millis(self.search_duration_ms),
            marker_duration: Duration::from_millis(self.marker_duration_ms),
            ..HeaderConfig::default()
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB v3 API key
    pub tmdb_api_key: Option<String>,
    /// Response language, e.g. "en-US"
    pub language: Option<String>,
    /// Log file path (the terminal belongs to the TUI)
    pub log_file: Option<PathBuf>,
    /// off, error, warn, info, debug, trace
    pub log_level: Option<String>,
    pub header: HeaderSettings,
}

impl Config {
    /// Default config file path (~/.config/nomflix/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nomflix").join("config.toml"))
    }

    /// Load from `path` (or the default location); defaults if there is no file
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path.map(Path::to_path_buf).or_else(Self::path) {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Strict load, for callers that want the error
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// TMDB key: `TMDB_API_KEY` env var first, then the config file
    pub fn tmdb_api_key(&self) -> Option<String> {
        Self::key_from(std::env::var("TMDB_API_KEY").ok(), self.tmdb_api_key.clone())
    }

    fn key_from(env: Option<String>, file: Option<String>) -> Option<String> {
        let usable = |k: &String| !k.trim().is_empty();
        env.filter(usable).or_else(|| file.filter(usable))
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or("en-US")
    }

    /// Log file path, defaulting to the platform cache dir
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| dirs::cache_dir().map(|p| p.join("nomflix").join("nomflix.log")))
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|l| l.parse().ok())
            .unwrap_or(LevelFilter::Info)
    }
}
