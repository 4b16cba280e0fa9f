//! Two-team match generation
//!
//! Level 2 - Phases

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SearchPolicy;
use crate::naming::draw_team_names;
use crate::player::Player;
use crate::pool::PlayerPool;
use crate::role::{Role, FIELD_ROLES};
use crate::solver::{solve_with_restarts, RoleSlot};

/// Players needed for a match without coaches
pub const MATCH_PLAYERS: usize = 10;
/// Players needed for a match with coaches
pub const COACH_MATCH_PLAYERS: usize = 12;

/// One of the two sides of a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Azure,
    Crimson,
}

impl Side {
    pub const fn index(self) -> usize {
        match self {
            Side::Azure => 0,
            Side::Crimson => 1,
        }
    }
}

/// A filled role slot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSlot {
    pub role: Role,
    pub player: Player,
}

/// A generated two-team match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub room_id: String,
    pub azure_team: Vec<TeamSlot>,
    pub crimson_team: Vec<TeamSlot>,
    pub azure_team_name: String,
    pub crimson_team_name: String,
    pub is_coach_mode: bool,
    /// Creation time, Unix milliseconds
    pub timestamp: i64,
}

impl MatchResult {
    /// Slots of one side
    pub fn team(&self, side: Side) -> &[TeamSlot] {
        match side {
            Side::Azure => &self.azure_team,
            Side::Crimson => &self.crimson_team,
        }
    }

    pub fn team_name(&self, side: Side) -> &str {
        match side {
            Side::Azure => &self.azure_team_name,
            Side::Crimson => &self.crimson_team_name,
        }
    }

    /// Ids of every drafted player, azure first
    pub fn player_ids(&self) -> impl Iterator<Item = &str> {
        self.azure_team
            .iter()
            .chain(&self.crimson_team)
            .map(|slot| slot.player.id.as_str())
    }
}

/// Headcount a match requires
pub fn required_players(is_coach_mode: bool) -> usize {
    if is_coach_mode {
        COACH_MATCH_PLAYERS
    } else {
        MATCH_PLAYERS
    }
}

/// Field roles for azure, field roles for crimson, then one coach each
pub fn match_slots(is_coach_mode: bool) -> Vec<RoleSlot> {
    let mut slots: Vec<RoleSlot> = [Side::Azure, Side::Crimson]
        .iter()
        .flat_map(|side| FIELD_ROLES.iter().map(move |&role| RoleSlot::new(side.index(), role)))
        .collect();

    if is_coach_mode {
        slots.push(RoleSlot::new(Side::Azure.index(), Role::Coach));
        slots.push(RoleSlot::new(Side::Crimson.index(), Role::Coach));
    }
    slots
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a two-team match.
///
/// Returns `None` when the pool is too small (no search is run) or when
/// the solver finds no assignment within `policy`.
pub fn generate_match_with<R: Rng>(
    players: &[Player],
    room_id: &str,
    is_coach_mode: bool,
    policy: &SearchPolicy,
    rng: &mut R,
) -> Option<MatchResult> {
    let pool = PlayerPool::new(players);
    let required = required_players(is_coach_mode);
    if pool.len() < required {
        tracing::debug!("Match needs {} players, pool has {}", required, pool.len());
        return None;
    }

    let slots = match_slots(is_coach_mode);
    let assignment = solve_with_restarts(&pool, &slots, policy, rng)?;
    debug_assert!(assignment.is_valid(&slots, &pool));

    let mut teams: [Vec<TeamSlot>; 2] = [Vec::new(), Vec::new()];
    for (slot, &idx) in slots.iter().zip(assignment.indices()) {
        teams[slot.team].push(TeamSlot {
            role: slot.role,
            player: pool.player(idx).clone(),
        });
    }
    for team in &mut teams {
        team.sort_by_key(|s| s.role.index());
    }

    let mut names = draw_team_names(2, rng).into_iter();
    let azure_team_name = names.next().unwrap_or_default();
    let crimson_team_name = names.next().unwrap_or_default();
    let [azure_team, crimson_team] = teams;

    Some(MatchResult {
        room_id: room_id.to_string(),
        azure_team,
        crimson_team,
        azure_team_name,
        crimson_team_name,
        is_coach_mode,
        timestamp: now_millis(),
    })
}
