//! Player pool - the indexed set of players for one generation call
//!
//! Level 4 - Utilities
//!
//! Players are referenced by dense integer index so the solver can track
//! used players in a bitset instead of hashing string ids.

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;

use crate::player::Player;
use crate::role::{Role, ALL_ROLES, ROLE_COUNT};

/// Candidate player indices for each role, indexed by `Role::index()`
pub type CandidateTable = [Vec<usize>; ROLE_COUNT];

/// Active, de-duplicated players with per-role eligibility lists
#[derive(Clone, Debug)]
pub struct PlayerPool<'a> {
    players: Vec<&'a Player>,
    eligible: CandidateTable,
}

impl<'a> PlayerPool<'a> {
    /// Build a pool from the supplied players.
    ///
    /// Inactive players are skipped. Players are keyed by id: a repeated id
    /// keeps its first occurrence.
    pub fn new(players: &'a [Player]) -> Self {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut pool = Vec::with_capacity(players.len());

        for player in players.iter().filter(|p| p.is_active) {
            if seen.insert(player.id.as_str()) {
                pool.push(player);
            } else {
                tracing::warn!("Duplicate player id {} ({}), ignoring", player.id, player.name);
            }
        }

        let eligible = std::array::from_fn(|i| {
            let role = ALL_ROLES[i];
            pool.iter()
                .enumerate()
                .filter(|(_, p)| p.can_play(role))
                .map(|(idx, _)| idx)
                .collect()
        });

        Self {
            players: pool,
            eligible,
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player at a pool index
    pub fn player(&self, idx: usize) -> &'a Player {
        self.players[idx]
    }

    pub fn players(&self) -> &[&'a Player] {
        &self.players
    }

    /// Indices of players eligible for `role`, in pool order
    pub fn eligible(&self, role: Role) -> &[usize] {
        &self.eligible[role.index()]
    }

    /// Number of players eligible for `role`
    pub fn eligible_count(&self, role: Role) -> usize {
        self.eligible[role.index()].len()
    }

    /// Candidates for `role` in search order: least versatile first,
    /// uniformly random among equal versatility.
    pub fn candidates<R: Rng>(&self, role: Role, rng: &mut R) -> Vec<usize> {
        let mut list = self.eligible[role.index()].clone();
        list.shuffle(rng);
        // Stable sort keeps the shuffled order among ties
        list.sort_by_key(|&idx| self.players[idx].versatility());
        list
    }

    /// Freshly randomized candidate lists for every role
    pub fn candidate_table<R: Rng>(&self, rng: &mut R) -> CandidateTable {
        std::array::from_fn(|i| self.candidates(ALL_ROLES[i], rng))
    }
}
