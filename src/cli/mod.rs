//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the anonymize filter
//! using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Anonymize - consistent field anonymization for event streams
#[derive(Parser, Debug)]
#[command(name = "anonymize")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "anonymize.toml", env = "ANONYMIZE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ANONYMIZE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize newline-delimited JSON events
    Run(commands::run::RunArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["anonymize", "run"]);
        assert_eq!(cli.config, "anonymize.toml");
        assert!(matches!(cli.command, Commands::Run(_)));
    }

    #[test]
    fn test_cli_parse_run_with_files() {
        let cli = Cli::parse_from([
            "anonymize", "run", "--input", "in.ndjson", "--output", "out.ndjson",
        ]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.input.as_deref(), Some(std::path::Path::new("in.ndjson")));
        assert_eq!(args.output.as_deref(), Some(std::path::Path::new("out.ndjson")));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["anonymize", "--config", "custom.toml", "run"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["anonymize", "--log-level", "debug", "run"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["anonymize", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }
}
