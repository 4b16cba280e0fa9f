//! Player definitions and role eligibility

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Reserved id of the placeholder player used for not-yet-assigned slots
pub const TBD_PLAYER_ID: &str = "tbd";

/// Versatility of an all-roles player. Higher than any explicit role count.
pub const ALL_ROLES_VERSATILITY: u32 = 6;

fn default_active() -> bool {
    true
}

/// Career record kept by the roster owner. The engine only carries it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStats {
    pub matches_played: u32,
    pub wins: u32,
    pub current_streak: u32,
    pub max_streak: u32,
}

/// A registered player
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub is_all_roles: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub stats: PlayerStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_last_match_mvp: Option<bool>,
    /// Last match evaluation, -2 to 2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_match_rating: Option<i32>,
}

impl Player {
    /// Create an active player with no roles
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            roles: Vec::new(),
            is_all_roles: false,
            is_active: true,
            stats: PlayerStats::default(),
            is_last_match_mvp: None,
            last_match_rating: None,
        }
    }

    /// Set explicit roles
    pub fn with_roles(mut self, roles: &[Role]) -> Self {
        self.roles = roles.to_vec();
        self
    }

    /// Mark as eligible for every field role
    pub fn all_roles(mut self) -> Self {
        self.is_all_roles = true;
        self
    }

    /// Mark as sitting out
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// The placeholder player
    pub fn tbd() -> Self {
        Self::new(TBD_PLAYER_ID, "?")
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == TBD_PLAYER_ID
    }

    /// Coach is the only explicit role and the player is not all-roles
    pub fn is_coach_only(&self) -> bool {
        !self.is_all_roles
            && !self.roles.is_empty()
            && self.roles.iter().all(|&r| r == Role::Coach)
    }

    /// Whether this player may occupy a slot of `role`
    pub fn can_play(&self, role: Role) -> bool {
        if self.is_placeholder() {
            return true;
        }
        if role == Role::Coach {
            return self.roles.contains(&Role::Coach);
        }
        if self.is_coach_only() {
            return false;
        }
        self.is_all_roles || self.roles.contains(&role)
    }

    /// Breadth of role eligibility, used only as a search-order key
    pub fn versatility(&self) -> u32 {
        if self.is_all_roles {
            ALL_ROLES_VERSATILITY
        } else {
            self.roles.len() as u32
        }
    }
}

/// Whether `player` may occupy a slot of `role`
pub fn can_play(player: &Player, role: Role) -> bool {
    player.can_play(role)
}
