//! LANEDRAFT CLI - Command-line interface
//!
//! Commands:
//! - match: Draft two teams from a roster
//! - bracket: Draft a multi-team bracket
//! - validate: Check a roster can field a bracket
//! - benchmark: Compare search policies
//! - serve: Start the HTTP API

mod benchmark;
mod bracket_cmd;
mod match_cmd;
mod server;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lanedraft_core::GeneratorConfig;

#[derive(Parser)]
#[command(name = "lanedraft")]
#[command(about = "LANEDRAFT role-aware team generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Generator configuration JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Draft two teams for one match
    Match(match_cmd::MatchArgs),
    /// Draft a multi-team bracket
    Bracket(bracket_cmd::BracketArgs),
    /// Check whether a roster can field a bracket
    Validate(bracket_cmd::ValidateArgs),
    /// Compare single-attempt and restart search policies
    Benchmark(benchmark::BenchmarkArgs),
    /// Start the HTTP API server
    Serve(server::ServerArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        Commands::Match(args) => match_cmd::run(args, config),
        Commands::Bracket(args) => bracket_cmd::run(args, config),
        Commands::Validate(args) => bracket_cmd::run_validate(args),
        Commands::Benchmark(args) => benchmark::run(args, cli.seed),
        Commands::Serve(args) => server::run(args, config),
    }
}

/// Generator config from an optional file, with `--seed` taking precedence
fn load_config(path: Option<&std::path::Path>, seed: Option<u64>) -> Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_global_seed() {
        let cli = Cli::parse_from([
            "lanedraft", "match", "--roster", "r.json", "--room", "1", "--seed", "7",
        ]);
        assert_eq!(cli.seed, Some(7));
        assert!(matches!(cli.command, Commands::Match(_)));
    }

    #[test]
    fn test_load_config_seed_override() {
        let config = load_config(None, Some(3)).unwrap();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.match_policy, GeneratorConfig::default().match_policy);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Some(std::path::Path::new("/nonexistent/cfg.json")), None);
        assert!(result.is_err());
    }
}
