//! Benchmark command - compare search policies on one roster
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: select_mode(), run_policies(), report_results()
//! - Level 3: benchmark_policy(), run_once()
//! - Level 4: timing utilities, formatting
//!
//! Each run is an independent generation call with its own seed, so runs are
//! spread across threads with rayon. A single solve stays single-threaded.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use lanedraft_core::bracket::generate_bracket_with;
use lanedraft_core::matchup::{generate_match_with, required_players};
use lanedraft_core::{validate_bracket_pool, Player, PlayerPool, SearchPolicy};

use crate::match_cmd::load_players;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Roster JSON file
    #[arg(long, value_name = "FILE")]
    pub roster: PathBuf,

    /// Benchmark brackets of this many teams instead of a two-team match
    #[arg(long, conflicts_with = "coach")]
    pub teams: Option<usize>,

    /// Benchmark two-team matches in coach mode
    #[arg(long)]
    pub coach: bool,

    /// Generation calls per policy
    #[arg(long, default_value = "100")]
    pub runs: u64,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// What each run generates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Match { coach: bool },
    Bracket { teams: usize },
}

impl Mode {
    fn describe(&self) -> String {
        match self {
            Mode::Match { coach: true } => "two-team match (coach mode)".to_string(),
            Mode::Match { coach: false } => "two-team match".to_string(),
            Mode::Bracket { teams } => format!("{}-team bracket", teams),
        }
    }

    /// Policies worth comparing for this mode
    fn policies(&self) -> Vec<(String, SearchPolicy)> {
        match self {
            Mode::Match { .. } => vec![
                ("single attempt, 200k ops".to_string(), SearchPolicy::single_attempt(200_000)),
                ("5 restarts, 40k ops".to_string(), SearchPolicy::restarts(5, 40_000)),
            ],
            Mode::Bracket { .. } => vec![
                ("single attempt, 1M ops".to_string(), SearchPolicy::single_attempt(1_000_000)),
                ("50 restarts, 20k ops".to_string(), SearchPolicy::restarts(50, 20_000)),
                ("200 restarts, 5k ops".to_string(), SearchPolicy::restarts(200, 5_000)),
            ],
        }
    }
}

/// Results for one policy
#[derive(Clone, Debug, Serialize)]
struct PolicyResult {
    policy: String,
    runs: u64,
    successes: u64,
    success_rate: f64,
    #[serde(skip)]
    total_time: Duration,
    mean_time_us: f64,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run benchmark command
///
/// This function reads like a table of contents:
/// 1. Load the roster and pick the generation mode
/// 2. Run every policy over the same seeds
/// 3. Report all results
pub fn run(args: BenchmarkArgs, seed: Option<u64>) -> Result<()> {
    let players = load_players(&args.roster)?;
    let mode = select_mode(&args, &players)?;

    tracing::info!(
        "Benchmarking {} with {} active players, {} runs per policy",
        mode.describe(),
        players.len(),
        args.runs
    );

    let results = run_policies(&players, mode, args.runs, seed.unwrap_or(0))?;

    report_results(&results, mode, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Pick the mode and reject pools that cannot pass the cheap checks
fn select_mode(args: &BenchmarkArgs, players: &[Player]) -> Result<Mode> {
    match args.teams {
        Some(teams) => {
            validate_bracket_pool(players, teams)?;
            Ok(Mode::Bracket { teams })
        }
        None => {
            let required = required_players(args.coach);
            let available = PlayerPool::new(players).len();
            if available < required {
                anyhow::bail!(
                    "INSUFFICIENT PLAYERS: Need {} active players. Current: {}",
                    required,
                    available
                );
            }
            Ok(Mode::Match { coach: args.coach })
        }
    }
}

/// Benchmark each policy with a shared progress bar
fn run_policies(players: &[Player], mode: Mode, runs: u64, base_seed: u64) -> Result<Vec<PolicyResult>> {
    let policies = mode.policies();

    let progress = ProgressBar::new(runs * policies.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{msg:28} [{bar:40}] {pos}/{len} runs ({eta})")?
            .progress_chars("=> "),
    );

    let results = policies
        .into_iter()
        .map(|(label, policy)| {
            progress.set_message(label.clone());
            benchmark_policy(players, mode, label, &policy, runs, base_seed, &progress)
        })
        .collect();

    progress.finish_and_clear();
    Ok(results)
}

fn report_results(results: &[PolicyResult], mode: Mode, args: &BenchmarkArgs) {
    if args.json {
        print_json_results(results, mode);
    } else {
        print_text_results(results, mode);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Run one policy over seeds `base_seed..base_seed + runs` in parallel
fn benchmark_policy(
    players: &[Player],
    mode: Mode,
    label: String,
    policy: &SearchPolicy,
    runs: u64,
    base_seed: u64,
    progress: &ProgressBar,
) -> PolicyResult {
    let outcomes: Vec<(bool, Duration)> = (0..runs)
        .into_par_iter()
        .map(|i| {
            let outcome = run_once(players, mode, policy, base_seed.wrapping_add(i));
            progress.inc(1);
            outcome
        })
        .collect();

    let successes = outcomes.iter().filter(|(ok, _)| *ok).count() as u64;
    let total_time: Duration = outcomes.iter().map(|(_, t)| *t).sum();

    PolicyResult {
        policy: label,
        runs,
        successes,
        success_rate: ratio(successes, runs),
        total_time,
        mean_time_us: mean_micros(total_time, runs),
    }
}

/// One timed generation call
fn run_once(players: &[Player], mode: Mode, policy: &SearchPolicy, seed: u64) -> (bool, Duration) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let start = Instant::now();
    let solved = match mode {
        Mode::Match { coach } => {
            generate_match_with(players, "benchmark", coach, policy, &mut rng).is_some()
        }
        Mode::Bracket { teams } => {
            generate_bracket_with(players, "benchmark", teams, policy, &mut rng).is_some()
        }
    };
    (solved, start.elapsed())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn mean_micros(total: Duration, runs: u64) -> f64 {
    if runs == 0 {
        0.0
    } else {
        total.as_secs_f64() * 1_000_000.0 / runs as f64
    }
}

/// Format duration for display
fn format_duration(d: Duration) -> String {
    if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else if d.as_millis() >= 1 {
        format!("{:.1}ms", d.as_secs_f64() * 1000.0)
    } else {
        format!("{:.1}us", d.as_secs_f64() * 1_000_000.0)
    }
}

/// Print results as JSON
fn print_json_results(results: &[PolicyResult], mode: Mode) {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        mode: String,
        policies: &'a [PolicyResult],
    }

    let output = JsonOutput {
        mode: mode.describe(),
        policies: results,
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text table
fn print_text_results(results: &[PolicyResult], mode: Mode) {
    println!("\n=== LANEDRAFT Benchmark: {} ===\n", mode.describe());

    println!(
        "{:<28} {:>6} {:>8} {:>12} {:>12}",
        "Policy", "Runs", "Solved", "Total Time", "Mean/Call"
    );
    println!("{}", "-".repeat(70));

    for r in results {
        println!(
            "{:<28} {:>6} {:>7.1}% {:>12} {:>12}",
            r.policy,
            r.runs,
            r.success_rate * 100.0,
            format_duration(r.total_time),
            format!("{:.1}us", r.mean_time_us)
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn flex(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(format!("p{}", i), format!("P{}", i)).all_roles())
            .collect()
    }

    fn args(teams: Option<usize>, coach: bool) -> BenchmarkArgs {
        BenchmarkArgs {
            roster: PathBuf::from("unused.json"),
            teams,
            coach,
            runs: 4,
            json: false,
        }
    }

    #[test]
    fn test_format_duration() {
        assert!(format_duration(Duration::from_micros(300)).contains("us"));
        assert!(format_duration(Duration::from_millis(500)).contains("ms"));
        assert!(format_duration(Duration::from_secs(5)).contains("s"));
    }

    #[test]
    fn test_ratio_and_mean() {
        assert_eq!(ratio(3, 4), 0.75);
        assert_eq!(ratio(1, 0), 0.0);
        assert!((mean_micros(Duration::from_millis(2), 4) - 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_select_mode() {
        let players = flex(20);
        assert_eq!(
            select_mode(&args(Some(4), false), &players).unwrap(),
            Mode::Bracket { teams: 4 }
        );
        assert_eq!(
            select_mode(&args(None, false), &players).unwrap(),
            Mode::Match { coach: false }
        );
        assert!(select_mode(&args(Some(5), false), &players).is_err());
        assert!(select_mode(&args(None, true), &flex(11)).is_err());
    }

    #[test]
    fn test_benchmark_policy_on_flex_pool() {
        let players = flex(15);
        let mode = Mode::Bracket { teams: 3 };
        let progress = ProgressBar::hidden();
        let result = benchmark_policy(
            &players,
            mode,
            "restarts".to_string(),
            &SearchPolicy::restarts(10, 5_000),
            8,
            0,
            &progress,
        );
        assert_eq!(result.runs, 8);
        assert_eq!(result.successes, 8);
        assert_eq!(result.success_rate, 1.0);
        assert_eq!(progress.position(), 8);
    }

    #[test]
    fn test_run_once_is_seeded() {
        let players = flex(10);
        let policy = SearchPolicy::single_attempt(1_000);
        let (a, _) = run_once(&players, Mode::Match { coach: false }, &policy, 3);
        assert!(a);
        let (b, _) = run_once(&players, Mode::Match { coach: true }, &policy, 3);
        assert!(!b);
    }
}
