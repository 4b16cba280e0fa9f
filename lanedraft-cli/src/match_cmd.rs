//! Match command - draft two teams from a roster file
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_players(), draft_match(), report_match()
//! - Level 3: check_headcount()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use lanedraft_core::matchup::required_players;
use lanedraft_core::{GeneratorConfig, MatchResult, Matchmaker, Player, PlayerPool, Roster, Side, TeamSlot};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Roster JSON file
    #[arg(long, value_name = "FILE")]
    pub roster: PathBuf,

    /// Room identifier attached to the result
    #[arg(long)]
    pub room: String,

    /// Draft a coach for each side
    #[arg(long)]
    pub coach: bool,

    /// Output the match as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// This function reads like a table of contents:
/// 1. Load the active players
/// 2. Draft both teams
/// 3. Report the match
pub fn run(args: MatchArgs, config: GeneratorConfig) -> Result<()> {
    let players = load_players(&args.roster)?;

    tracing::info!(
        "Drafting room {} from {} active players (coach mode: {})",
        args.room,
        players.len(),
        args.coach
    );

    let result = draft_match(&players, &args, config)?;

    report_match(&result, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load the roster and keep its active players
pub(crate) fn load_players(path: &Path) -> Result<Vec<Player>> {
    let roster = Roster::load(path)
        .with_context(|| format!("Failed to load roster: {}", path.display()))?;
    Ok(roster.active())
}

/// Draft two teams, turning a failed search into a user-facing error
fn draft_match(players: &[Player], args: &MatchArgs, config: GeneratorConfig) -> Result<MatchResult> {
    check_headcount(players, args.coach)?;

    let mut matchmaker = Matchmaker::new(config);
    matchmaker
        .generate_match(players, &args.room, args.coach)
        .ok_or_else(|| anyhow::anyhow!("IMPOSSIBLE COMPOSITION. Too many constrained roles."))
}

/// Print the match as JSON or text
fn report_match(result: &MatchResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", format_match(result));
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn check_headcount(players: &[Player], is_coach_mode: bool) -> Result<()> {
    let required = required_players(is_coach_mode);
    let available = PlayerPool::new(players).len();
    if available < required {
        anyhow::bail!(
            "INSUFFICIENT PLAYERS: Need {} active players. Current: {}",
            required,
            available
        );
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn format_match(result: &MatchResult) -> String {
    let mut out = format!(
        "Room {} ({})\n",
        result.room_id,
        format_timestamp(result.timestamp)
    );
    for side in [Side::Azure, Side::Crimson] {
        out.push_str(&format!("\n{}\n", result.team_name(side)));
        for slot in result.team(side) {
            out.push_str(&format_slot(slot));
        }
    }
    out
}

/// One aligned `role  name` line
pub(crate) fn format_slot(slot: &TeamSlot) -> String {
    format!("  {:<10} {}\n", slot.role.label(), slot.player.name)
}

/// Unix milliseconds as a UTC date-time
pub(crate) fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| millis.to_string())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use lanedraft_core::Role;

    fn flex(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(format!("p{}", i), format!("Player {}", i)).all_roles())
            .collect()
    }

    fn args(coach: bool) -> MatchArgs {
        MatchArgs {
            roster: PathBuf::from("unused.json"),
            room: "42".to_string(),
            coach,
            json: false,
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00 UTC");
    }

    #[test]
    fn test_format_slot() {
        let slot = TeamSlot {
            role: Role::Mid,
            player: Player::new("1", "Ana"),
        };
        assert_eq!(format_slot(&slot), "  Mid Lane   Ana\n");
    }

    #[test]
    fn test_headcount_message() {
        let err = check_headcount(&flex(11), true).unwrap_err();
        assert_eq!(
            err.to_string(),
            "INSUFFICIENT PLAYERS: Need 12 active players. Current: 11"
        );
        assert!(check_headcount(&flex(10), false).is_ok());
    }

    #[test]
    fn test_draft_match_seeded() {
        let players = flex(10);
        let config = GeneratorConfig::default().with_seed(5);
        let a = draft_match(&players, &args(false), config.clone()).unwrap();
        let b = draft_match(&players, &args(false), config).unwrap();
        assert_eq!(a.azure_team, b.azure_team);
        assert_eq!(a.room_id, "42");

        let text = format_match(&a);
        assert!(text.contains(&a.azure_team_name));
        assert!(text.contains("Farm Lane"));
    }

    #[test]
    fn test_draft_match_without_coaches_fails() {
        let err = draft_match(&flex(12), &args(true), GeneratorConfig::default().with_seed(1))
            .unwrap_err();
        assert!(err.to_string().starts_with("IMPOSSIBLE COMPOSITION"));
    }
}
