//! Bracket and validate commands - multi-team drafts from a roster file
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run(), run_validate() - orchestration
//! - Level 2: draft_bracket(), report_bracket()
//! - Level 3: (delegated to lanedraft-core)
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use lanedraft_core::{validate_bracket_pool, BracketMatchResult, GeneratorConfig, Matchmaker, Player};

use crate::match_cmd::{format_slot, format_timestamp, load_players};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BracketArgs {
    /// Roster JSON file
    #[arg(long, value_name = "FILE")]
    pub roster: PathBuf,

    /// Room identifier attached to the result
    #[arg(long)]
    pub room: String,

    /// Number of teams to draft
    #[arg(long)]
    pub teams: usize,

    /// Output the bracket as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Roster JSON file
    #[arg(long, value_name = "FILE")]
    pub roster: PathBuf,

    /// Number of teams to check for
    #[arg(long)]
    pub teams: usize,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run bracket command
///
/// This function reads like a table of contents:
/// 1. Load the active players
/// 2. Validate, then draft all teams
/// 3. Report the bracket
pub fn run(args: BracketArgs, config: GeneratorConfig) -> Result<()> {
    let players = load_players(&args.roster)?;

    tracing::info!(
        "Drafting {} teams for room {} from {} active players",
        args.teams,
        args.room,
        players.len()
    );

    let result = draft_bracket(&players, &args, config)?;

    report_bracket(&result, args.json)
}

/// Run validate command
pub fn run_validate(args: ValidateArgs) -> Result<()> {
    let players = load_players(&args.roster)?;
    validate_bracket_pool(&players, args.teams)?;
    println!(
        "OK: {} active players can field {} teams",
        players.len(),
        args.teams
    );
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Validate the pool, then draft. Validation errors are reported verbatim.
fn draft_bracket(
    players: &[Player],
    args: &BracketArgs,
    config: GeneratorConfig,
) -> Result<BracketMatchResult> {
    let mut matchmaker = Matchmaker::new(config);
    matchmaker.validate_bracket_pool(players, args.teams)?;

    matchmaker
        .generate_bracket_match(players, &args.room, args.teams)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "UNABLE TO BALANCE TEAMS. Please check role distribution or add more flexible players."
            )
        })
}

fn report_bracket(result: &BracketMatchResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", format_bracket(result));
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn format_bracket(result: &BracketMatchResult) -> String {
    let mut out = format!(
        "Room {} ({}), {} teams\n",
        result.room_id,
        format_timestamp(result.timestamp),
        result.teams.len()
    );
    for team in &result.teams {
        out.push_str(&format!("\n{} [{}]\n", team.name, team.color));
        for slot in &team.slots {
            out.push_str(&format_slot(slot));
        }
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
