//! CLI Command Tests
//!
//! Argument parsing, JSON output format and exit codes.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use nomflix::cli::{Cli, Command, LogLevel, MediaTypeFilter};

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["nomflix"]);
        assert!(!cli.is_cli_mode());
        assert_eq!(cli.route, "/");
    }

    #[test]
    fn test_route_flag() {
        let cli = Cli::parse_from(["nomflix", "--route", "/tv"]);
        assert!(!cli.is_cli_mode());
        assert_eq!(cli.route, "/tv");

        let cli = Cli::parse_from(["nomflix", "-r", "/search?keyword=dune"]);
        assert_eq!(cli.route, "/search?keyword=dune");
    }

    #[test]
    fn test_home_command() {
        let cli = Cli::parse_from(["nomflix", "home"]);
        match cli.command {
            Some(Command::Home(cmd)) => assert_eq!(cmd.limit, 20),
            _ => panic!("Expected Home command"),
        }
    }

    #[test]
    fn test_tv_command_alias_and_limit() {
        let cli = Cli::parse_from(["nomflix", "t", "-l", "5"]);
        match cli.command {
            Some(Command::Tv(cmd)) => assert_eq!(cmd.limit, 5),
            _ => panic!("Expected Tv command"),
        }
    }

    #[test]
    fn test_search_with_filters() {
        let cli = Cli::parse_from(["nomflix", "search", "the batman", "--limit", "10", "-t", "movie"]);
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.query, "the batman");
                assert_eq!(cmd.limit, 10);
                assert_eq!(cmd.media_type, Some(MediaTypeFilter::Movie));
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["nomflix", "search"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "nomflix",
            "home",
            "--json",
            "-q",
            "--config",
            "/tmp/nomflix.toml",
            "--log-file",
            "/tmp/nomflix.log",
            "--log-level",
            "debug",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(cli.should_json());
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/nomflix.toml")));
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        assert!(Cli::try_parse_from(["nomflix", "--log-level", "loud"]).is_err());
    }
}

// =============================================================================
// Exit Codes and Output
// =============================================================================

mod exit_codes {
    use nomflix::cli::{ExitCode, JsonOutput};

    #[test]
    fn test_exit_code_values() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::ConfigError), 4);
    }

    #[test]
    fn test_success_envelope() {
        let json = serde_json::to_string(&JsonOutput::success(vec!["a"])).unwrap();
        assert_eq!(json, r#"{"data":["a"]}"#);
    }

    #[test]
    fn test_failure_envelope() {
        let out = JsonOutput::failure("No TMDB API key", ExitCode::ConfigError);
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(value["error"], "No TMDB API key");
        assert_eq!(value["exit_code"], 4);
    }
}

// =============================================================================
// Command Handlers (mocked TMDB is exercised in tmdb_test)
// =============================================================================

mod handlers {
    use nomflix::cli::{ExitCode, MediaTypeFilter, Output, SearchCmd};
    use nomflix::commands;
    use nomflix::config::Config;

    fn quiet() -> Output {
        Output {
            json: false,
            quiet: true,
        }
    }

    #[test]
    fn test_blank_search_is_rejected_before_network() {
        let cmd = SearchCmd {
            query: "\t ".to_string(),
            limit: 20,
            media_type: Some(MediaTypeFilter::Tv),
        };
        let code = tokio_test::block_on(commands::search_cmd(cmd, &Config::default(), &quiet()));
        assert_eq!(code, ExitCode::InvalidArgs);
    }
}
