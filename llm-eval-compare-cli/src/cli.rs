//! Command-line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{compare::CompareArgs, config::ConfigCommands};
use crate::output::OutputFormat;

/// Compare evaluation runs side by side
#[derive(Debug, Parser)]
#[command(name = "llm-eval-compare", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (defaults to the configured setting)
    #[arg(short = 'f', long = "format", global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Settings file layered over the user settings
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare the results of several evaluation runs
    Compare(CompareArgs),

    /// Inspect CLI settings
    Config(ConfigCommands),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare_arguments() {
        let cli = Cli::try_parse_from([
            "llm-eval-compare",
            "compare",
            "--evaluation",
            "haiku",
            "--records",
            "records.json",
            "--config",
            "evaluation.toml",
            "--evaluation-run-ids",
            "r2,r1",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Compare(args) => {
                assert_eq!(args.evaluation, "haiku");
                assert_eq!(args.evaluation_run_ids, "r2,r1");
                assert!(args.open.is_none());
            }
            Commands::Config(_) => panic!("expected compare"),
        }
    }
}
