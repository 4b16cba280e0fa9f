//! Multi-team bracket validation and generation
//!
//! Level 2 - Phases
//!
//! A bracket fills `num_teams * 5` field slots at once. Generation relies on
//! randomized restarts with a small per-attempt budget: many cheap attempts
//! escape bad early branches better than one deep search.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SearchPolicy;
use crate::error::PoolError;
use crate::matchup::{now_millis, TeamSlot};
use crate::naming::{draw_team_names, team_color};
use crate::player::Player;
use crate::pool::PlayerPool;
use crate::role::{FIELD_ROLES, FIELD_ROLE_COUNT};
use crate::solver::{solve_with_restarts, RoleSlot};

/// A team in a bracket
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTeam {
    pub name: String,
    pub slots: Vec<TeamSlot>,
    pub color: String,
}

/// A generated multi-team bracket
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketMatchResult {
    pub room_id: String,
    pub teams: Vec<BracketTeam>,
    /// Creation time, Unix milliseconds
    pub timestamp: i64,
}

impl BracketMatchResult {
    /// Ids of every drafted player, team by team
    pub fn player_ids(&self) -> impl Iterator<Item = &str> {
        self.teams
            .iter()
            .flat_map(|t| t.slots.iter())
            .map(|slot| slot.player.id.as_str())
    }
}

/// Serializable `{ valid, error? }` form of a validation result
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<(), PoolError>> for PoolValidation {
    fn from(result: Result<(), PoolError>) -> Self {
        match result {
            Ok(()) => Self {
                valid: true,
                error: None,
            },
            Err(e) => Self {
                valid: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Field slots for `num_teams` teams, team by team in canonical role order
pub fn bracket_slots(num_teams: usize) -> Vec<RoleSlot> {
    (0..num_teams)
        .flat_map(|team| FIELD_ROLES.iter().map(move |&role| RoleSlot::new(team, role)))
        .collect()
}

fn check_headcount(pool: &PlayerPool<'_>, num_teams: usize) -> Result<(), PoolError> {
    let needed = match num_teams.checked_mul(FIELD_ROLE_COUNT) {
        Some(needed) if num_teams > 0 => needed,
        _ => return Err(PoolError::InvalidTeamCount),
    };
    if pool.len() < needed {
        return Err(PoolError::InsufficientPlayers {
            needed,
            available: pool.len(),
            teams: num_teams,
        });
    }
    Ok(())
}

/// Cheap feasibility check: headcount, then per-role supply.
///
/// Passing is necessary but not sufficient for a bracket to exist.
pub fn validate_pool(players: &[Player], num_teams: usize) -> Result<(), PoolError> {
    let pool = PlayerPool::new(players);
    check_headcount(&pool, num_teams)?;

    for role in FIELD_ROLES {
        let available = pool.eligible_count(role);
        if available < num_teams {
            return Err(PoolError::RoleShortage {
                role,
                needed: num_teams,
                available,
            });
        }
    }
    Ok(())
}

/// Generate a bracket of `num_teams` teams.
///
/// Returns `None` when the headcount is too small (no search is run) or
/// when every attempt in `policy` fails.
pub fn generate_bracket_with<R: Rng>(
    players: &[Player],
    room_id: &str,
    num_teams: usize,
    policy: &SearchPolicy,
    rng: &mut R,
) -> Option<BracketMatchResult> {
    let pool = PlayerPool::new(players);
    if let Err(e) = check_headcount(&pool, num_teams) {
        tracing::debug!("Bracket skipped: {}", e);
        return None;
    }

    let slots = bracket_slots(num_teams);
    let assignment = solve_with_restarts(&pool, &slots, policy, rng)?;
    debug_assert!(assignment.is_valid(&slots, &pool));

    let mut team_slots: Vec<Vec<TeamSlot>> = vec![Vec::with_capacity(FIELD_ROLE_COUNT); num_teams];
    for (slot, &idx) in slots.iter().zip(assignment.indices()) {
        team_slots[slot.team].push(TeamSlot {
            role: slot.role,
            player: pool.player(idx).clone(),
        });
    }

    let names = draw_team_names(num_teams, rng);
    let teams = team_slots
        .into_iter()
        .zip(names)
        .enumerate()
        .map(|(t, (mut slots, name))| {
            slots.sort_by_key(|s| s.role.index());
            BracketTeam {
                name: name.to_uppercase(),
                slots,
                color: team_color(t).to_string(),
            }
        })
        .collect();

    Some(BracketMatchResult {
        room_id: room_id.to_string(),
        teams,
        timestamp: now_millis(),
    })
}
