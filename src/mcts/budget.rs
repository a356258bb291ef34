//! Decision budgets: the per-decision resource loop gate, the one-shot
//! clock bonus, and the agent-lifetime time pool.
//!
//! A decision consumes one resource `r` against a budget `R`: elapsed
//! wall-clock milliseconds in time mode, completed iterations otherwise.
//! The clock bonus reallocates part of the remaining lifetime pool into
//! the current decision when the search is halfway through its budget and
//! the agent looks close to the end of the game (few own moves left per
//! finished playout).

use std::time::{Duration, Instant};

/// Agent-lifetime time pool, drawn down by every searched decision.
///
/// Created once per agent instance and read-mutated sequentially across
/// the decisions of one match; may go negative once overdrawn.
#[derive(Clone, Debug)]
pub struct TimePool {
    remaining_ms: i64,
}

impl TimePool {
    /// Create a pool holding `ms` milliseconds.
    #[must_use]
    pub fn new(ms: u64) -> Self {
        Self {
            remaining_ms: ms as i64,
        }
    }

    /// Milliseconds left in the pool (negative once overdrawn).
    #[must_use]
    pub fn available_ms(&self) -> i64 {
        self.remaining_ms
    }

    /// Charge a completed decision's wall-clock duration to the pool.
    pub fn charge(&mut self, elapsed: Duration) {
        self.remaining_ms -= elapsed.as_millis() as i64;
    }
}

/// Budget mode for one decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetMode {
    /// `R` is a wall-clock allowance in milliseconds.
    Time,
    /// `R` is an iteration count.
    Iterations,
}

/// Accumulates the clock-bonus move-rate estimate.
///
/// Counts the configured player's moves over playouts that reached a true
/// terminal state; cutoff playouts are excluded. Counting stops once the
/// bonus fires (the controller disarms and the driver stops recording).
#[derive(Clone, Debug, Default)]
pub struct BonusEstimator {
    moves_by_self: u64,
    valid_playouts: u64,
}

impl BonusEstimator {
    /// Record one terminal-reaching playout and the number of own moves
    /// it contained.
    pub fn record_playout(&mut self, own_moves: u64) {
        self.moves_by_self += own_moves;
        self.valid_playouts += 1;
    }

    /// Playouts recorded so far.
    #[must_use]
    pub fn valid_playouts(&self) -> u64 {
        self.valid_playouts
    }

    /// Average own moves per terminal playout; unbounded when no playout
    /// reached a terminal state.
    #[must_use]
    pub fn average(&self) -> f64 {
        if self.valid_playouts == 0 {
            f64::INFINITY
        } else {
            self.moves_by_self as f64 / self.valid_playouts as f64
        }
    }
}

/// Tracks budget consumption for one decision.
///
/// Constructed at decision start; `consume_tick` is called once per
/// completed iteration and `remaining` gates the loop.
#[derive(Clone, Debug)]
pub struct ResourceController {
    mode: BudgetMode,
    start: Instant,
    /// Total budget `R` (ms or iterations).
    budget: u64,
    /// Consumed resource `r`.
    used: u64,
    /// True until the one-shot bonus fires (or was never enabled).
    bonus_armed: bool,
}

impl ResourceController {
    /// Start tracking a decision beginning now.
    ///
    /// `bonus_enabled` only takes effect in time mode.
    #[must_use]
    pub fn new(mode: BudgetMode, budget: u64, bonus_enabled: bool) -> Self {
        Self {
            mode,
            start: Instant::now(),
            budget,
            used: 0,
            bonus_armed: bonus_enabled && mode == BudgetMode::Time,
        }
    }

    /// Consumed resource `r`.
    #[must_use]
    pub fn used(&self) -> u64 {
        self.used
    }

    /// Total budget `R`, including any granted bonus.
    #[must_use]
    pub fn budget(&self) -> u64 {
        self.budget
    }

    /// Resource left before the loop must stop.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.budget.saturating_sub(self.used)
    }

    /// Wall-clock time since the decision started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Account for one completed iteration.
    pub fn consume_tick(&mut self) {
        self.used = match self.mode {
            BudgetMode::Time => self.start.elapsed().as_millis() as u64,
            BudgetMode::Iterations => self.used + 1,
        };
    }

    /// Whether bonus instrumentation should still accumulate.
    #[must_use]
    pub fn bonus_armed(&self) -> bool {
        self.bonus_armed
    }

    /// One-shot clock bonus: fires the first time `r >= R/2`, then never
    /// again this decision.
    ///
    /// Grants `max(r, min(2000, floor(pool / max(1, estimate)))) - r`
    /// extra budget, where `estimate` is the average number of own moves
    /// per terminal playout. An unbounded estimate (no valid playouts)
    /// grants nothing. Returns the granted amount when the check fires.
    pub fn maybe_grant_bonus(&mut self, pool_ms: i64, estimator: &BonusEstimator) -> Option<u64> {
        if !self.bonus_armed || self.used < self.budget / 2 {
            return None;
        }
        self.bonus_armed = false;

        let average = estimator.average();
        let share = if average.is_finite() {
            (pool_ms as f64 / average.max(1.0)).floor()
        } else {
            0.0
        };
        let target = share.min(2000.0).max(self.used as f64);
        let bonus = target as u64 - self.used;
        self.budget += bonus;
        Some(bonus)
    }
}
