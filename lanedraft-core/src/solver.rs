//! Randomized backtracking assignment solver
//!
//! Level 3 - Steps
//!
//! Fills an ordered list of role slots from a player pool. Each attempt
//! randomizes candidate order (least versatile first) and slot order
//! (scarcest role first), then runs a depth-first search capped by an
//! operation budget. `solve_with_restarts` wraps single attempts in a
//! retry loop.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SearchPolicy;
use crate::pool::{CandidateTable, PlayerPool};
use crate::role::{Role, ROLE_COUNT};

// ============================================================================
// TYPES
// ============================================================================

/// A single (team, role) demand filled by exactly one player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleSlot {
    pub team: usize,
    pub role: Role,
}

impl RoleSlot {
    pub fn new(team: usize, role: Role) -> Self {
        Self { team, role }
    }
}

/// Complete, injective slot -> player mapping.
///
/// Entry `i` is the pool index of the player filling slot `i` of the
/// slot list the solver was given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    players: Vec<usize>,
}

impl Assignment {
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Pool index of the player in `slot`
    pub fn player_index(&self, slot: usize) -> usize {
        self.players[slot]
    }

    /// Pool indices in slot order
    pub fn indices(&self) -> &[usize] {
        &self.players
    }

    /// Check every slot is filled by a distinct, eligible player
    pub fn is_valid(&self, slots: &[RoleSlot], pool: &PlayerPool<'_>) -> bool {
        if self.players.len() != slots.len() {
            return false;
        }
        let mut used = UsedMask::new(pool.len());
        for (slot, &idx) in slots.iter().zip(&self.players) {
            if idx >= pool.len() || used.contains(idx) || !pool.player(idx).can_play(slot.role) {
                return false;
            }
            used.insert(idx);
        }
        true
    }
}

/// Outcome of one solve attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Every slot filled
    Solved(Assignment),
    /// Search space exhausted: no assignment exists
    Exhausted,
    /// Operation budget ran out before an answer was found
    BudgetExceeded,
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    pub fn into_assignment(self) -> Option<Assignment> {
        match self {
            SolveOutcome::Solved(assignment) => Some(assignment),
            _ => None,
        }
    }
}

/// Outcome plus the recursive steps it took
#[derive(Clone, Debug)]
pub struct AttemptResult {
    pub outcome: SolveOutcome,
    pub operations: u64,
}

// ============================================================================
// USED-PLAYER BITSET
// ============================================================================

/// Bitset over pool indices
#[derive(Clone, Debug)]
struct UsedMask {
    words: Vec<u64>,
}

impl UsedMask {
    fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)],
        }
    }

    #[inline]
    fn contains(&self, idx: usize) -> bool {
        self.words[idx / 64] & (1u64 << (idx % 64)) != 0
    }

    #[inline]
    fn insert(&mut self, idx: usize) {
        self.words[idx / 64] |= 1u64 << (idx % 64);
    }

    #[inline]
    fn remove(&mut self, idx: usize) {
        self.words[idx / 64] &= !(1u64 << (idx % 64));
    }
}

// ============================================================================
// SEARCH
// ============================================================================

enum Step {
    Found,
    DeadEnd,
    OutOfBudget,
}

struct Search<'s> {
    slots: &'s [RoleSlot],
    order: &'s [usize],
    candidates: &'s CandidateTable,
    used: UsedMask,
    assigned: Vec<usize>,
    operations: u64,
    budget: u64,
}

impl<'s> Search<'s> {
    fn descend(&mut self, depth: usize) -> Step {
        if depth == self.order.len() {
            return Step::Found;
        }

        self.operations += 1;
        if self.operations > self.budget {
            return Step::OutOfBudget;
        }

        let slot = self.order[depth];
        let candidates: &'s CandidateTable = self.candidates;

        for &player in &candidates[self.slots[slot].role.index()] {
            if self.used.contains(player) {
                continue;
            }

            self.used.insert(player);
            self.assigned[slot] = player;

            match self.descend(depth + 1) {
                Step::Found => return Step::Found,
                Step::OutOfBudget => return Step::OutOfBudget,
                Step::DeadEnd => self.used.remove(player),
            }
        }

        Step::DeadEnd
    }
}

/// Whether supply covers demand before any search
fn has_enough_supply(pool: &PlayerPool<'_>, slots: &[RoleSlot]) -> bool {
    if pool.len() < slots.len() {
        return false;
    }
    let mut demand = [0usize; ROLE_COUNT];
    for slot in slots {
        demand[slot.role.index()] += 1;
    }
    crate::role::ALL_ROLES
        .iter()
        .all(|&role| pool.eligible_count(role) >= demand[role.index()])
}

/// Slot indices ordered scarcest role first, ties random
fn constrained_order<R: Rng>(pool: &PlayerPool<'_>, slots: &[RoleSlot], rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..slots.len()).collect();
    order.shuffle(rng);
    order.sort_by_key(|&i| pool.eligible_count(slots[i].role));
    order
}

/// Run one randomized solve attempt with the given operation budget
pub fn solve_attempt<R: Rng>(
    pool: &PlayerPool<'_>,
    slots: &[RoleSlot],
    operation_budget: u64,
    rng: &mut R,
) -> AttemptResult {
    if !has_enough_supply(pool, slots) {
        return AttemptResult {
            outcome: SolveOutcome::Exhausted,
            operations: 0,
        };
    }

    let candidates = pool.candidate_table(rng);
    let order = constrained_order(pool, slots, rng);

    let mut search = Search {
        slots,
        order: &order,
        candidates: &candidates,
        used: UsedMask::new(pool.len()),
        assigned: vec![usize::MAX; slots.len()],
        operations: 0,
        budget: operation_budget,
    };

    let outcome = match search.descend(0) {
        Step::Found => SolveOutcome::Solved(Assignment {
            players: search.assigned,
        }),
        Step::DeadEnd => SolveOutcome::Exhausted,
        Step::OutOfBudget => SolveOutcome::BudgetExceeded,
    };

    AttemptResult {
        outcome,
        operations: search.operations,
    }
}

/// Retry loop around `solve_attempt`.
///
/// Stops at the first success. An exhausted attempt explored every
/// candidate, so no later attempt can succeed and the loop ends there.
pub fn solve_with_restarts<R: Rng>(
    pool: &PlayerPool<'_>,
    slots: &[RoleSlot],
    policy: &SearchPolicy,
    rng: &mut R,
) -> Option<Assignment> {
    run_restarts(pool, slots, policy, rng).0
}

/// Restart loop body. Also returns how many attempts ran.
fn run_restarts<R: Rng>(
    pool: &PlayerPool<'_>,
    slots: &[RoleSlot],
    policy: &SearchPolicy,
    rng: &mut R,
) -> (Option<Assignment>, usize) {
    let mut total_operations = 0u64;

    for attempt in 1..=policy.max_attempts {
        let result = solve_attempt(pool, slots, policy.operation_budget, rng);
        total_operations += result.operations;

        match result.outcome {
            SolveOutcome::Solved(assignment) => {
                tracing::debug!(
                    "Solved {} slots on attempt {} ({} operations total)",
                    slots.len(),
                    attempt,
                    total_operations
                );
                return (Some(assignment), attempt);
            }
            SolveOutcome::Exhausted => {
                tracing::debug!(
                    "No assignment exists for {} slots (attempt {}, {} operations)",
                    slots.len(),
                    attempt,
                    result.operations
                );
                return (None, attempt);
            }
            SolveOutcome::BudgetExceeded => {
                tracing::debug!(
                    "Attempt {}/{} hit budget of {} operations",
                    attempt,
                    policy.max_attempts,
                    policy.operation_budget
                );
            }
        }
    }

    tracing::debug!(
        "Gave up after {} attempts ({} operations total)",
        policy.max_attempts,
        total_operations
    );
    (None, policy.max_attempts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;
    use crate::role::FIELD_ROLES;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn team_slots(teams: usize) -> Vec<RoleSlot> {
        (0..teams)
            .flat_map(|t| FIELD_ROLES.iter().map(move |&r| RoleSlot::new(t, r)))
            .collect()
    }

    fn specialists(per_role: usize) -> Vec<Player> {
        let mut players = Vec::new();
        for role in FIELD_ROLES {
            for i in 0..per_role {
                players.push(
                    Player::new(format!("{:?}-{}", role, i), format!("{} {}", role, i))
                        .with_roles(&[role]),
                );
            }
        }
        players
    }

    #[test]
    fn test_used_mask() {
        let mut mask = UsedMask::new(130);
        assert!(!mask.contains(129));
        mask.insert(129);
        mask.insert(0);
        assert!(mask.contains(129));
        assert!(mask.contains(0));
        mask.remove(129);
        assert!(!mask.contains(129));
        assert!(mask.contains(0));
    }

    #[test]
    fn test_solves_specialists() {
        let players = specialists(2);
        let pool = PlayerPool::new(&players);
        let slots = team_slots(2);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = solve_attempt(&pool, &slots, 10_000, &mut rng);
        let assignment = result.outcome.into_assignment().expect("should solve");
        assert!(assignment.is_valid(&slots, &pool));
        assert_eq!(assignment.len(), 10);
    }

    #[test]
    fn test_supply_shortage_skips_search() {
        let mut players = specialists(2);
        players.retain(|p| !p.can_play(Role::Roam));
        players.push(Player::new("x", "Extra").with_roles(&[Role::Mid]));
        players.push(Player::new("y", "Extra2").with_roles(&[Role::Mid]));
        let pool = PlayerPool::new(&players);
        let slots = team_slots(2);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = solve_attempt(&pool, &slots, 10_000, &mut rng);
        assert_eq!(result.outcome, SolveOutcome::Exhausted);
        assert_eq!(result.operations, 0);
    }

    #[test]
    fn test_unsatisfiable_overlap_is_exhausted() {
        let mut players = specialists(1);
        players.retain(|p| !p.can_play(Role::Clash) && !p.can_play(Role::Jungle));
        players.push(Player::new("cj", "Both").with_roles(&[Role::Clash, Role::Jungle]));
        players.push(Player::new("m2", "Mid2").with_roles(&[Role::Mid, Role::Clash]));
        let pool = PlayerPool::new(&players);
        // Jungle forces cj, so Clash falls to m2
        let slots = vec![
            RoleSlot::new(0, Role::Clash),
            RoleSlot::new(0, Role::Jungle),
            RoleSlot::new(0, Role::Mid),
            RoleSlot::new(0, Role::Farm),
            RoleSlot::new(0, Role::Roam),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let result = solve_attempt(&pool, &slots, 10_000, &mut rng);
        let assignment = result.outcome.into_assignment().expect("m2 can take clash");
        assert!(assignment.is_valid(&slots, &pool));

        // Without the mid specialist m2 is needed at both Clash and Mid.
        // Per-role supply still looks sufficient.
        let mut players = players;
        players.retain(|p| p.id != "Mid-0");
        players.push(Player::new("r2", "Roam2").with_roles(&[Role::Roam]));
        let pool = PlayerPool::new(&players);
        let result = solve_attempt(&pool, &slots, 10_000, &mut rng);
        assert_eq!(result.outcome, SolveOutcome::Exhausted);
        assert!(result.operations > 0);
    }

    #[test]
    fn test_budget_exceeded() {
        let players = specialists(4);
        let pool = PlayerPool::new(&players);
        let slots = team_slots(4);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let result = solve_attempt(&pool, &slots, 3, &mut rng);
        assert_eq!(result.outcome, SolveOutcome::BudgetExceeded);
        assert_eq!(result.operations, 4);
    }

    #[test]
    fn test_empty_slots_trivially_solved() {
        let players = specialists(1);
        let pool = PlayerPool::new(&players);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let result = solve_attempt(&pool, &[], 0, &mut rng);
        assert!(result.outcome.is_solved());
        assert_eq!(result.operations, 0);
    }

    #[test]
    fn test_assignment_keeps_caller_slot_order() {
        let players = specialists(1);
        let pool = PlayerPool::new(&players);
        let slots = team_slots(1);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let assignment = solve_with_restarts(&pool, &slots, &SearchPolicy::single_attempt(1_000), &mut rng)
            .expect("should solve");
        for (slot, &idx) in slots.iter().zip(assignment.indices()) {
            assert_eq!(pool.player(idx).roles, vec![slot.role]);
        }
    }

    #[test]
    fn test_restarts_stop_on_exhaustion() {
        let players = specialists(1);
        let pool = PlayerPool::new(&players);
        let slots = team_slots(2);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let policy = SearchPolicy::restarts(50, 1_000);
        assert!(solve_with_restarts(&pool, &slots, &policy, &mut rng).is_none());
    }

    /// One team whose only solution puts the flexible `a` in Jungler.
    ///
    /// Mid is filled first by `c`. When Clash is ordered before Jungler it
    /// takes the less versatile `a` and the search must backtrack; otherwise
    /// the first descent succeeds in exactly five operations.
    fn clash_jungle_trap() -> Vec<Player> {
        vec![
            Player::new("a", "A").with_roles(&[Role::Clash, Role::Jungle]),
            Player::new("b", "B").with_roles(&[Role::Clash, Role::Farm, Role::Roam]),
            Player::new("c", "C").with_roles(&[Role::Jungle, Role::Mid]),
            Player::new("f", "F").with_roles(&[Role::Farm]),
            Player::new("r", "R").with_roles(&[Role::Roam]),
        ]
    }

    #[test]
    fn test_tight_budget_fails_some_attempts() {
        let players = clash_jungle_trap();
        let pool = PlayerPool::new(&players);
        let slots = team_slots(1);
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        let outcomes: Vec<SolveOutcome> = (0..64)
            .map(|_| solve_attempt(&pool, &slots, 5, &mut rng).outcome)
            .collect();
        assert!(outcomes.iter().any(|o| *o == SolveOutcome::BudgetExceeded));
        assert!(outcomes.iter().any(|o| o.is_solved()));
        assert!(!outcomes.contains(&SolveOutcome::Exhausted));
    }

    #[test]
    fn test_restart_recovers_from_budget_exceeded() {
        let players = clash_jungle_trap();
        let pool = PlayerPool::new(&players);
        let slots = team_slots(1);
        let policy = SearchPolicy::restarts(40, 5);

        let mut restarted = 0;
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let (assignment, attempts) = run_restarts(&pool, &slots, &policy, &mut rng);
            let assignment = assignment.expect("a later attempt should solve");
            assert!(assignment.is_valid(&slots, &pool));
            assert_eq!(pool.player(assignment.player_index(1)).id, "a");
            if attempts > 1 {
                restarted += 1;
            }
        }
        assert!(restarted > 0, "some seeds should need more than one attempt");
    }

    #[test]
    fn test_zero_attempts_fails() {
        let players = specialists(1);
        let pool = PlayerPool::new(&players);
        let slots = team_slots(1);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let policy = SearchPolicy::restarts(0, 1_000);
        assert!(solve_with_restarts(&pool, &slots, &policy, &mut rng).is_none());
    }

    #[test]
    fn test_is_valid_rejects_duplicates() {
        let players = specialists(1);
        let pool = PlayerPool::new(&players);
        let slots = vec![RoleSlot::new(0, Role::Clash), RoleSlot::new(1, Role::Clash)];
        let assignment = Assignment {
            players: vec![0, 0],
        };
        assert!(!assignment.is_valid(&slots, &pool));
    }
}
