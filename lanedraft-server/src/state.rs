//! Server state management
//!
//! Shared generator configuration and counters. No roster or match data is
//! kept between requests.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use lanedraft_core::{GeneratorConfig, Matchmaker};

/// Outcome counters since startup
#[derive(Clone, Debug, Default, Serialize)]
pub struct GenerationStats {
    pub generated: u64,
    pub failed: u64,
}

/// Server-wide shared state
pub struct ServerState {
    pub config: GeneratorConfig,
    pub stats: RwLock<GenerationStats>,
    seed_counter: AtomicU64,
}

impl ServerState {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            stats: RwLock::new(GenerationStats::default()),
            seed_counter: AtomicU64::new(0),
        }
    }

    /// A matchmaker for one request.
    ///
    /// With a configured seed, request `n` uses `seed + n` so a fixed request
    /// sequence replays identically. Otherwise each request is entropy-seeded.
    pub fn matchmaker(&self) -> Matchmaker {
        let mut config = self.config.clone();
        if let Some(base) = config.seed {
            let offset = self.seed_counter.fetch_add(1, Ordering::Relaxed);
            config.seed = Some(base.wrapping_add(offset));
        }
        Matchmaker::new(config)
    }

    /// Count a finished generation
    pub fn record(&self, success: bool) {
        if let Ok(mut stats) = self.stats.write() {
            if success {
                stats.generated += 1;
            } else {
                stats.failed += 1;
            }
        }
    }

    pub fn snapshot(&self) -> GenerationStats {
        self.stats.read().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(GeneratorConfig::server())
    }
}
