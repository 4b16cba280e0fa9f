//! Matchmaker - entry point for all generation calls
//!
//! Level 1 - Orchestration

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::bracket::{generate_bracket_with, validate_pool, BracketMatchResult};
use crate::config::GeneratorConfig;
use crate::error::PoolError;
use crate::matchup::{generate_match_with, MatchResult};
use crate::player::Player;

/// Generates matches and brackets with a configured policy and RNG
pub struct Matchmaker {
    /// Generator configuration
    config: GeneratorConfig,
    rng: ChaCha8Rng,
}

impl Matchmaker {
    /// Create a matchmaker. Seeds from `config.seed`, else from OS entropy.
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Create a matchmaker with default policies and a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GeneratorConfig::default().with_seed(seed))
    }

    /// Build two teams of five (plus a coach each in coach mode)
    pub fn generate_match(
        &mut self,
        players: &[Player],
        room_id: &str,
        is_coach_mode: bool,
    ) -> Option<MatchResult> {
        let result = generate_match_with(
            players,
            room_id,
            is_coach_mode,
            &self.config.match_policy,
            &mut self.rng,
        );

        match &result {
            Some(m) => tracing::info!(
                "Match {} generated: {} vs {}",
                room_id,
                m.azure_team_name,
                m.crimson_team_name
            ),
            None => tracing::warn!(
                "Match {} could not be composed from {} players",
                room_id,
                players.len()
            ),
        }
        result
    }

    /// Pre-flight check before a bracket
    pub fn validate_bracket_pool(&self, players: &[Player], num_teams: usize) -> Result<(), PoolError> {
        validate_pool(players, num_teams)
    }

    /// Build `num_teams` teams of five
    pub fn generate_bracket_match(
        &mut self,
        players: &[Player],
        room_id: &str,
        num_teams: usize,
    ) -> Option<BracketMatchResult> {
        let result = generate_bracket_with(
            players,
            room_id,
            num_teams,
            &self.config.bracket_policy,
            &mut self.rng,
        );

        match &result {
            Some(_) => tracing::info!("Bracket {} generated with {} teams", room_id, num_teams),
            None => tracing::warn!(
                "Bracket {} could not balance {} teams from {} players",
                room_id,
                num_teams,
                players.len()
            ),
        }
        result
    }

    /// Get configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl Default for Matchmaker {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

/// Generate a two-team match with default policy and fresh randomness
pub fn generate_match(players: &[Player], room_id: &str, is_coach_mode: bool) -> Option<MatchResult> {
    Matchmaker::default().generate_match(players, room_id, is_coach_mode)
}

/// Validate a pool for a bracket of `num_teams`
pub fn validate_bracket_pool(players: &[Player], num_teams: usize) -> Result<(), PoolError> {
    validate_pool(players, num_teams)
}

/// Generate a bracket with default policy and fresh randomness
pub fn generate_bracket_match(
    players: &[Player],
    room_id: &str,
    num_teams: usize,
) -> Option<BracketMatchResult> {
    Matchmaker::default().generate_bracket_match(players, room_id, num_teams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn flex_pool(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(format!("p{}", i), format!("P{}", i)).all_roles())
            .collect()
    }

    #[test]
    fn test_seeded_matchmakers_agree() {
        let players = flex_pool(20);
        let a = Matchmaker::with_seed(77).generate_bracket_match(&players, "r", 3).unwrap();
        let b = Matchmaker::with_seed(77).generate_bracket_match(&players, "r", 3).unwrap();
        assert_eq!(a.teams, b.teams);
    }

    #[test]
    fn test_successive_calls_differ() {
        let players = flex_pool(30);
        let mut mm = Matchmaker::with_seed(1);
        let first: Vec<String> = mm
            .generate_bracket_match(&players, "r", 2)
            .unwrap()
            .player_ids()
            .map(String::from)
            .collect();
        let differs = (0..10).any(|_| {
            let next: Vec<String> = mm
                .generate_bracket_match(&players, "r", 2)
                .unwrap()
                .player_ids()
                .map(String::from)
                .collect();
            next != first
        });
        assert!(differs, "RNG state should advance between calls");
    }

    #[test]
    fn test_free_functions() {
        let mut players = flex_pool(10);
        players.push(Player::new("c", "Coach").with_roles(&[Role::Coach]));
        assert!(generate_match(&players, "1", false).is_some());
        assert!(generate_match(&players, "1", true).is_none());
        assert!(validate_bracket_pool(&players, 2).is_ok());
        assert!(generate_bracket_match(&players, "1", 2).is_some());
    }
}
