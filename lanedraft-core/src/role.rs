//! Role definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of field roles per team
pub const FIELD_ROLE_COUNT: usize = 5;

/// Number of roles including coach
pub const ROLE_COUNT: usize = 6;

/// Team position. Five field roles plus the auxiliary coach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Clash Lane")]
    Clash,
    #[serde(rename = "Jungler", alias = "Jungle")]
    Jungle,
    #[serde(rename = "Mid Lane")]
    Mid,
    #[serde(rename = "Farm Lane")]
    Farm,
    #[serde(rename = "Roam")]
    Roam,
    #[serde(rename = "Coach")]
    Coach,
}

/// Field roles in canonical slot order
pub const FIELD_ROLES: [Role; FIELD_ROLE_COUNT] = [
    Role::Clash,
    Role::Jungle,
    Role::Mid,
    Role::Farm,
    Role::Roam,
];

/// All roles in display order (coach last)
pub const ALL_ROLES: [Role; ROLE_COUNT] = [
    Role::Clash,
    Role::Jungle,
    Role::Mid,
    Role::Farm,
    Role::Roam,
    Role::Coach,
];

impl Role {
    /// Dense index, also the display order within a team
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Role::Clash => 0,
            Role::Jungle => 1,
            Role::Mid => 2,
            Role::Farm => 3,
            Role::Roam => 4,
            Role::Coach => 5,
        }
    }

    /// Human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            Role::Clash => "Clash Lane",
            Role::Jungle => "Jungler",
            Role::Mid => "Mid Lane",
            Role::Farm => "Farm Lane",
            Role::Roam => "Roam",
            Role::Coach => "Coach",
        }
    }

    /// Whether this role occupies a position on the field
    pub const fn is_field(self) -> bool {
        !matches!(self, Role::Coach)
    }

    /// Parse a role label, case-insensitive. Accepts "Jungle" as an alias.
    pub fn from_label(label: &str) -> Option<Role> {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case("jungle") {
            return Some(Role::Jungle);
        }
        ALL_ROLES
            .iter()
            .copied()
            .find(|r| r.label().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
