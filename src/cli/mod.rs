//! Command-line interface for repo-loc
//!
//! Takes a repository path and an output path as positional arguments.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod count;

pub use count::CountArgs;

/// Count lines of tracked files and append per-directory LOC metrics
#[derive(Parser)]
#[command(name = "repo-loc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    args: CountArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    count::run(cli.args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_positional_arguments() {
        let cli = Cli::try_parse_from(["repo-loc", "repo", "out.jsonl"]).expect("parse");
        assert_eq!(cli.args.target, std::path::PathBuf::from("repo"));
        assert_eq!(cli.args.output, std::path::PathBuf::from("out.jsonl"));
        assert!(cli.args.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_requires_both_positionals() {
        assert!(Cli::try_parse_from(["repo-loc"]).is_err());
        assert!(Cli::try_parse_from(["repo-loc", "repo"]).is_err());
        assert!(Cli::try_parse_from(["repo-loc", "a", "b", "c"]).is_err());
    }
}
