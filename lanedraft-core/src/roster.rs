//! Roster - the full list of registered players

use crate::player::Player;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Registered players, active or not
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Roster {
    pub players: Vec<Player>,
}

impl Roster {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Load from JSON file (handles both a bare player array and `{"players": [...]}`)
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse from a JSON string
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let roster = if content.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<Player>>(content).map(Self::new)
        } else {
            serde_json::from_str::<Roster>(content)
        };
        roster.map_err(|e| anyhow::anyhow!("Invalid roster JSON: {}", e))
    }

    /// Players taking part in the next draft
    pub fn active(&self) -> Vec<Player> {
        self.players.iter().filter(|p| p.is_active).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
