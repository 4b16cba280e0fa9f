//! Error types

use crate::role::Role;

/// Why a pool cannot support a bracket
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("INVALID TEAM COUNT: A bracket needs at least one team and a representable player count.")]
    InvalidTeamCount,

    #[error("INSUFFICIENT PLAYERS: Need {needed} active players for {teams} teams. Current: {available}")]
    InsufficientPlayers {
        needed: usize,
        available: usize,
        teams: usize,
    },

    #[error(
        "CRITICAL SHORTAGE: Need {} players for {}, but only {} are available.",
        .needed,
        .role.label().to_uppercase(),
        .available
    )]
    RoleShortage {
        role: Role,
        needed: usize,
        available: usize,
    },
}

impl PoolError {
    /// Players missing for the pool to pass
    pub fn shortfall(&self) -> usize {
        match self {
            PoolError::InvalidTeamCount => 0,
            PoolError::InsufficientPlayers { needed, available, .. }
            | PoolError::RoleShortage { needed, available, .. } => needed.saturating_sub(*available),
        }
    }
}
