//! CLI - Command Line Interface for Nomflix
//!
//! Without a subcommand the interactive TUI starts. The listing subcommands
//! print what the matching page would show, JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! nomflix                        # TUI at the home page
//! nomflix --route /tv            # TUI starting on TV shows
//! nomflix search "the batman" --json
//! nomflix tv --limit 5
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Missing or invalid configuration (e.g. no API key)
    ConfigError = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Nomflix - terminal movie & TV browser
///
/// Run without arguments to launch the interactive TUI.
#[derive(Parser, Debug)]
#[command(
    name = "nomflix",
    version,
    about = "Terminal movie & TV browser backed by TMDB",
    long_about = "Browse now-playing movies, popular TV shows and search \
                  results from The Movie Database.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for scripting.",
    after_help = "EXAMPLES:\n\
                  nomflix                            Launch interactive TUI\n\
                  nomflix --route /tv                Start on TV shows\n\
                  nomflix search \"blade runner\"      Search from the shell\n\
                  nomflix home --json                Now playing as JSON"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Log file path (overrides config)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log level (overrides config)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Route to open in the TUI
    #[arg(long, short = 'r', default_value = "/")]
    pub route: String,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

/// Log verbosity
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List movies now playing (home page)
    #[command(visible_alias = "h")]
    Home(ListCmd),

    /// List popular TV shows (tv page)
    #[command(visible_alias = "t")]
    Tv(ListCmd),

    /// Search for movies and TV shows
    #[command(visible_alias = "s")]
    Search(SearchCmd),
}

/// Options shared by listing commands
#[derive(Args, Debug)]
pub struct ListCmd {
    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Search for movies and TV shows by query
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,

    /// Filter by media type
    #[arg(long, short = 't', value_enum)]
    pub media_type: Option<MediaTypeFilter>,
}

/// Media type filter for search
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTypeFilter {
    /// Movies only
    Movie,
    /// TV shows only
    Tv,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }
}

impl JsonOutput<()> {
    pub fn failure(msg: impl Into<String>, code: ExitCode) -> Self {
        Self {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&JsonOutput::success(data))?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print plain lines (human output)
    pub fn lines<I: IntoIterator<Item = String>>(&self, lines: I) {
        for line in lines {
            println!("{}", line);
        }
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            if let Ok(json) = serde_json::to_string_pretty(&JsonOutput::failure(&msg, code)) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

/// Check a `--route` value before starting the TUI
pub fn validate_route(route: &str) -> Result<&str, &'static str> {
    if route.trim().is_empty() {
        Err("Route must not be empty")
    } else if route.chars().any(char::is_whitespace) {
        Err("Route must not contain whitespace (URL-encode search keywords)")
    } else {
        Ok(route)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["nomflix"]);
        assert!(!cli.is_cli_mode());
        assert_eq!(cli.route, "/");
    }

    #[test]
    fn test_json_failure_envelope() {
        let out = JsonOutput::failure("boom", ExitCode::NetworkError);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["error"], "boom");
        assert_eq!(json["exit_code"], 3);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_success_envelope_omits_exit_code() {
        let json = serde_json::to_value(JsonOutput::success(vec![1, 2])).unwrap();
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert!(json.get("exit_code").is_none());
    }

    #[test]
    fn test_validate_route() {
        assert!(validate_route("/tv").is_ok());
        assert!(validate_route("/search?keyword=a%20b").is_ok());
        assert!(validate_route("  ").is_err());
        assert!(validate_route("/search?keyword=a b").is_err());
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(log::LevelFilter::from(LogLevel::Debug), log::LevelFilter::Debug);
        assert_eq!(log::LevelFilter::from(LogLevel::Off), log::LevelFilter::Off);
    }
}
