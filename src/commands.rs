//! CLI Command Handlers
//!
//! Each handler fetches the listing its page would show and prints it.
//! Handlers take CLI args and Output, and return an ExitCode.

use crate::api::{TmdbClient, TmdbError};
use crate::cli::{ExitCode, ListCmd, MediaTypeFilter, Output, SearchCmd};
use crate::config::Config;
use crate::models::{MediaItem, MediaType};

/// Build a TMDB client from config, or report the missing key
fn client(config: &Config, output: &Output) -> Result<TmdbClient, ExitCode> {
    match config.tmdb_api_key() {
        Some(key) => Ok(TmdbClient::new(key).with_language(config.language())),
        None => Err(output.error(
            "No TMDB API key. Set TMDB_API_KEY or tmdb_api_key in the config file.",
            ExitCode::ConfigError,
        )),
    }
}

/// Map a fetch failure onto an exit code
fn failure_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<TmdbError>() {
        Some(TmdbError::Unauthorized) => ExitCode::ConfigError,
        Some(TmdbError::InvalidResponse(_)) => ExitCode::Error,
        _ => ExitCode::NetworkError,
    }
}

fn emit(mut items: Vec<MediaItem>, limit: usize, output: &Output) -> ExitCode {
    items.truncate(limit);
    if output.json {
        if let Err(e) = output.print(&items) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        output.lines(items.iter().map(|item| item.to_string()));
    }
    ExitCode::Success
}

// =============================================================================
// Listing Commands
// =============================================================================

pub async fn home_cmd(cmd: ListCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match client(config, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    output.info("Fetching movies now playing...");

    match client.now_playing().await {
        Ok(items) => emit(items, cmd.limit, output),
        Err(e) => output.error(format!("Now playing fetch failed: {}", e), failure_code(&e)),
    }
}

pub async fn tv_cmd(cmd: ListCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match client(config, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    output.info("Fetching popular TV shows...");

    match client.popular_tv().await {
        Ok(items) => emit(items, cmd.limit, output),
        Err(e) => output.error(format!("Popular TV fetch failed: {}", e), failure_code(&e)),
    }
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, config: &Config, output: &Output) -> ExitCode {
    let query = cmd.query.trim();
    if query.is_empty() {
        return output.error("Search query must not be empty", ExitCode::InvalidArgs);
    }
    let client = match client(config, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    output.info(format!("Searching for: {}", query));

    match client.search(query).await {
        Ok(mut items) => {
            if let Some(filter) = cmd.media_type {
                items.retain(|item| match filter {
                    MediaTypeFilter::Movie => item.media_type == MediaType::Movie,
                    MediaTypeFilter::Tv => item.media_type == MediaType::Tv,
                });
            }
            emit(items, cmd.limit, output)
        }
        Err(e) => output.error(format!("Search failed: {}", e), failure_code(&e)),
    }
}
