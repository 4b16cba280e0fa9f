//! LANEDRAFT Core - Role-constrained team assignment engine
//!
//! This crate provides the draft logic for LANEDRAFT:
//! - Roles and player eligibility
//! - Player pools indexed for fast search
//! - Randomized backtracking solver with operation budgets and restarts
//! - Two-team match generation (optional coaches)
//! - Multi-team bracket validation and generation
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: Matchmaker (orchestration)
//! - Level 2: generate_match, validate_bracket_pool, generate_bracket_match (phases)
//! - Level 3: solve_with_restarts, solve_attempt (steps)
//! - Level 4: roles, players, pools, naming, configuration

pub mod role;
pub mod player;
pub mod roster;
pub mod pool;
pub mod solver;
pub mod config;
pub mod naming;
pub mod error;
pub mod matchup;
pub mod bracket;
pub mod matchmaker;

// Re-exports for convenient access
pub use role::{Role, FIELD_ROLES, FIELD_ROLE_COUNT, ROLE_COUNT};
pub use player::{can_play, Player, PlayerStats, ALL_ROLES_VERSATILITY, TBD_PLAYER_ID};
pub use roster::Roster;
pub use pool::PlayerPool;
pub use solver::{solve_attempt, solve_with_restarts, Assignment, RoleSlot, SolveOutcome};
pub use config::{GeneratorConfig, SearchPolicy};
pub use error::PoolError;
pub use matchup::{MatchResult, Side, TeamSlot};
pub use bracket::{BracketMatchResult, BracketTeam, PoolValidation};
pub use matchmaker::{generate_bracket_match, generate_match, validate_bracket_pool, Matchmaker};
