//! Search configuration parameters.

use serde::{Deserialize, Serialize};

/// UCT search configuration.
///
/// Budgets are fixed here at construction time; the per-call limits passed
/// to [`select_action`](crate::mcts::UctAgent::select_action) are accepted
/// for interface compatibility but unused.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UctConfig {
    /// Budget mode: wall-clock time when true, iteration count when false.
    pub time_based: bool,

    /// Enable the one-shot mid-search clock bonus (time-based mode only).
    pub clock_bonus_enabled: bool,

    /// Per-decision thinking time in milliseconds (time-based mode).
    pub thinking_time_ms: u64,

    /// Agent-lifetime time pool in milliseconds, drawn down by every
    /// searched decision and tapped by the clock bonus.
    pub global_time_ms: u64,

    /// Per-decision iteration budget (iteration-based mode).
    pub max_iterations: u32,

    /// Ply cutoff for random playouts.
    pub playout_cutoff_plies: u32,

    /// Accept games with chance events.
    pub allow_stochastic: bool,

    /// Random seed. `None` seeds from OS entropy so repeated decisions
    /// draw independently; tests set a seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            time_based: true,
            clock_bonus_enabled: false,
            thinking_time_ms: 500,
            global_time_ms: 60_000,
            max_iterations: 10_000,
            playout_cutoff_plies: 600,
            allow_stochastic: true,
            seed: None,
        }
    }
}

impl UctConfig {
    /// Create a config with the two feature flags set.
    pub fn new(time_based: bool, clock_bonus_enabled: bool) -> Self {
        Self {
            time_based,
            clock_bonus_enabled,
            ..Self::default()
        }
    }

    /// Create a new config with custom thinking time.
    pub fn with_thinking_time_ms(mut self, ms: u64) -> Self {
        self.thinking_time_ms = ms;
        self
    }

    /// Create a new config with a custom global time pool.
    pub fn with_global_time_ms(mut self, ms: u64) -> Self {
        self.global_time_ms = ms;
        self
    }

    /// Create a new config with a custom iteration budget.
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Create a new config with a custom playout cutoff.
    pub fn with_playout_cutoff(mut self, plies: u32) -> Self {
        self.playout_cutoff_plies = plies;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
