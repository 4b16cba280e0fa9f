//! Configuration types for team generation
//!
//! Level 4 - Utilities and configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Attempts for a two-team match
pub const DEFAULT_MATCH_ATTEMPTS: usize = 1;
/// Recursive steps allowed per two-team attempt
pub const DEFAULT_MATCH_OPERATION_BUDGET: u64 = 200_000;
/// Randomized restarts for a bracket
pub const DEFAULT_BRACKET_ATTEMPTS: usize = 50;
/// Recursive steps allowed per bracket attempt
pub const DEFAULT_BRACKET_OPERATION_BUDGET: u64 = 20_000;

/// How hard the solver tries before giving up
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPolicy {
    /// Independent randomized attempts
    pub max_attempts: usize,
    /// Cap on recursive steps within one attempt
    pub operation_budget: u64,
}

impl SearchPolicy {
    /// One attempt with the given budget
    pub fn single_attempt(operation_budget: u64) -> Self {
        Self {
            max_attempts: 1,
            operation_budget,
        }
    }

    /// Randomized restarts, each with the given budget
    pub fn restarts(max_attempts: usize, operation_budget: u64) -> Self {
        Self {
            max_attempts,
            operation_budget,
        }
    }

    /// Worst-case recursive steps across all attempts
    pub fn total_budget(&self) -> u64 {
        self.operation_budget.saturating_mul(self.max_attempts as u64)
    }
}

/// Generator configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Policy for two-team matches
    pub match_policy: SearchPolicy,
    /// Policy for multi-team brackets
    pub bracket_policy: SearchPolicy,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            match_policy: SearchPolicy::single_attempt(DEFAULT_MATCH_OPERATION_BUDGET),
            bracket_policy: SearchPolicy::restarts(
                DEFAULT_BRACKET_ATTEMPTS,
                DEFAULT_BRACKET_OPERATION_BUDGET,
            ),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Preset for server-side generation, which can afford larger budgets
    pub fn server() -> Self {
        Self {
            match_policy: SearchPolicy::restarts(5, DEFAULT_MATCH_OPERATION_BUDGET),
            bracket_policy: SearchPolicy::restarts(
                DEFAULT_BRACKET_ATTEMPTS * 2,
                DEFAULT_BRACKET_OPERATION_BUDGET * 5,
            ),
            seed: None,
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set two-team policy
    pub fn with_match_policy(mut self, policy: SearchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    /// Set bracket policy
    pub fn with_bracket_policy(mut self, policy: SearchPolicy) -> Self {
        self.bracket_policy = policy;
        self
    }

    /// Load from JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.match_policy.max_attempts, 1);
        assert_eq!(config.match_policy.operation_budget, DEFAULT_MATCH_OPERATION_BUDGET);
        assert_eq!(config.bracket_policy.max_attempts, DEFAULT_BRACKET_ATTEMPTS);
        assert_eq!(config.bracket_policy.operation_budget, DEFAULT_BRACKET_OPERATION_BUDGET);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_server_preset_is_larger() {
        let default = GeneratorConfig::default();
        let server = GeneratorConfig::server();
        assert!(server.bracket_policy.total_budget() > default.bracket_policy.total_budget());
        assert!(server.match_policy.total_budget() > default.match_policy.total_budget());
    }

    #[test]
    fn test_builders() {
        let config = GeneratorConfig::default()
            .with_seed(9)
            .with_match_policy(SearchPolicy::restarts(3, 100))
            .with_bracket_policy(SearchPolicy::single_attempt(500));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.match_policy, SearchPolicy::restarts(3, 100));
        assert_eq!(config.bracket_policy.max_attempts, 1);
    }

    #[test]
    fn test_partial_json() {
        let config: GeneratorConfig = serde_json::from_str(r#"{"seed": 5}"#).unwrap();
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.bracket_policy.max_attempts, DEFAULT_BRACKET_ATTEMPTS);
    }

    #[test]
    fn test_total_budget_saturates() {
        let policy = SearchPolicy::restarts(usize::MAX, u64::MAX);
        assert_eq!(policy.total_budget(), u64::MAX);
    }
}
