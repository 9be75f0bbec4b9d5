//! Immutable run configuration (Design Notes, "Global mutable state").
//!
//! The source binds its parameters through a process-wide parameter map.
//! We pass a `Config` value explicitly into the orchestrator and down into
//! the decomposers that need it instead.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Exact,
    Heuristic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardinalityStrategy {
    Binomial,
    Sequential,
    Binary,
    Commander,
}

impl Default for CardinalityStrategy {
    fn default() -> Self {
        CardinalityStrategy::Sequential
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatEncoding {
    Base,
    Improved,
    Ladder,
}

impl Default for SatEncoding {
    fn default() -> Self {
        SatEncoding::Improved
    }
}

/// The tabu queue's fixed length of 7 is a magic constant inherited
/// from the literature; it's preserved as a default but exposed as a
/// config knob rather than hardcoded.
#[derive(Debug, Clone, Copy)]
pub struct TabuConfig {
    pub tabu_queue_len: usize,
    pub max_rounds: usize,
    pub max_steps_per_round: usize,
}

impl Default for TabuConfig {
    fn default() -> Self {
        TabuConfig {
            tabu_queue_len: 7,
            max_rounds: 64,
            max_steps_per_round: 256,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub parallel: bool,
    pub seed: u64,
    pub cardinality_strategy: CardinalityStrategy,
    pub sat_encoding: SatEncoding,
    pub tabu: TabuConfig,
    /// Wall-clock budget for a single `run()` call; `None` means
    /// unbounded. When set, a watchdog thread signals the run's
    /// `TerminationFlag` once the budget elapses.
    pub time_budget: Option<Duration>,
    /// Worker pool size for the parallel heuristic sweep; `None` lets
    /// the orchestrator size the pool to the heuristic portfolio.
    pub worker_count: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: Mode::Heuristic,
            parallel: false,
            seed: 0,
            cardinality_strategy: CardinalityStrategy::default(),
            sat_encoding: SatEncoding::default(),
            tabu: TabuConfig::default(),
            time_budget: None,
            worker_count: None,
        }
    }
}

impl Config {
    pub fn with_seed(seed: u64) -> Self {
        Config {
            seed,
            ..Default::default()
        }
    }
}
