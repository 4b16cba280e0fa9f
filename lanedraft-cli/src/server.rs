//! Server command - start the HTTP API
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to lanedraft-server crate)

use anyhow::Result;
use clap::Args;

use lanedraft_core::GeneratorConfig;
use lanedraft_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8040")]
    pub port: u16,

    /// Use the default generator budgets instead of the larger server preset
    #[arg(long)]
    pub light: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// This function reads like a table of contents:
/// 1. Configure server
/// 2. Start server (blocking)
pub fn run(args: ServerArgs, generator: GeneratorConfig) -> Result<()> {
    let config = configure_server(&args, generator);

    tracing::info!("Starting LANEDRAFT API server on port {}", config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments.
///
/// `generator` already carries `--config` and `--seed`. Unless `--light` is
/// set, policies left at their defaults are raised to the server preset.
fn configure_server(args: &ServerArgs, generator: GeneratorConfig) -> ServerConfig {
    let generator = if args.light {
        generator
    } else {
        let defaults = GeneratorConfig::default();
        let preset = GeneratorConfig::server();
        GeneratorConfig {
            match_policy: if generator.match_policy == defaults.match_policy {
                preset.match_policy
            } else {
                generator.match_policy
            },
            bracket_policy: if generator.bracket_policy == defaults.bracket_policy {
                preset.bracket_policy
            } else {
                generator.bracket_policy
            },
            seed: generator.seed,
        }
    };

    ServerConfig {
        port: args.port,
        generator,
    }
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// TESTS
// ============================================================================
