//! Selection policies: the UCB1 value and randomized tie-breaking.
//!
//! Both mid-search child selection and final move selection pick a maximum
//! over candidates, breaking ties uniformly at random. The tie-break is a
//! streaming reservoir sample: a running count of equally-best candidates,
//! replacing the current best with probability `1/count` as each tie
//! arrives, so no tied-candidate set is ever materialized.

use crate::core::GameRng;

/// UCB1 value for a child: exploitation plus exploration.
///
/// `two_parent_log` is `2 * ln(max(1, parent visits))`, hoisted out by the
/// caller since it is shared by all siblings.
#[inline]
#[must_use]
pub fn ucb1_value(score_sum: f64, visit_count: u32, two_parent_log: f64) -> f64 {
    let visits = f64::from(visit_count);
    let exploit = score_sum / visits;
    let explore = (two_parent_log / visits).sqrt();
    exploit + explore
}

/// Streaming argmax with uniform random tie-breaking.
///
/// Offer every candidate with its value; `into_best` yields one of the
/// maximum-value candidates, each with probability `1/k` for `k` ties.
#[derive(Debug)]
pub struct Reservoir<T> {
    best: Option<T>,
    best_value: f64,
    ties: u32,
}

impl<T> Reservoir<T> {
    /// Create an empty reservoir.
    #[must_use]
    pub fn new() -> Self {
        Self {
            best: None,
            best_value: f64::NEG_INFINITY,
            ties: 0,
        }
    }

    /// Offer a candidate with its value.
    pub fn offer(&mut self, candidate: T, value: f64, rng: &mut GameRng) {
        if value > self.best_value || self.best.is_none() {
            self.best_value = value;
            self.best = Some(candidate);
            self.ties = 1;
        } else if value == self.best_value {
            self.ties += 1;
            if rng.gen_range_usize(0..self.ties as usize) == 0 {
                self.best = Some(candidate);
            }
        }
    }

    /// Number of equally-best candidates seen so far.
    #[must_use]
    pub fn ties(&self) -> u32 {
        self.ties
    }

    /// Consume the reservoir, yielding the chosen candidate.
    #[must_use]
    pub fn into_best(self) -> Option<T> {
        self.best
    }
}

impl<T> Default for Reservoir<T> {
    fn default() -> Self {
        Self::new()
    }
}
