//! The UCT decision loop.
//!
//! One decision builds a fresh tree and runs budget-gated iterations of
//! select/expand, playout, utility shaping, and backpropagation, then
//! returns the robust child (most-visited root move). Budgets, the clock
//! bonus, and the lifetime time pool are handled by
//! [`budget`](super::budget).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::debug;

use crate::core::{GameRng, PlayerId, PlayerMap};
use crate::rules::GameEngine;

use super::budget::{BonusEstimator, BudgetMode, ResourceController, TimePool};
use super::config::UctConfig;
use super::node::{NodeId, UctNode};
use super::stats::SearchStats;
use super::tree::{SearchTree, UTILITY_DECAY};

/// UCT agent: picks one move per turn under a time or iteration budget.
///
/// Generic over the game engine. Owns its configuration, RNG, lifetime
/// time pool, and the last decision's tree and statistics.
///
/// ## Usage
///
/// ```
/// use uct_agent::core::PlayerId;
/// use uct_agent::games::binary::BinaryChoiceGame;
/// use uct_agent::mcts::{UctAgent, UctConfig};
///
/// let game = BinaryChoiceGame::new(3);
/// let state = game.initial_state();
///
/// let config = UctConfig::new(false, false)
///     .with_max_iterations(200)
///     .with_seed(42);
/// let mut agent = UctAgent::new(game, config);
/// agent.init(PlayerId::new(1));
///
/// let mv = agent.select_action(&state, 1.0, 200, -1);
/// assert!(mv.is_some());
/// ```
pub struct UctAgent<E: GameEngine> {
    /// The game engine.
    engine: E,

    /// Search configuration.
    config: UctConfig,

    /// Which player this agent plays (set by `init`).
    player: PlayerId,

    /// Cached from the engine.
    player_count: usize,

    /// Agent-lifetime time pool, charged after every searched decision.
    pool: TimePool,

    /// RNG for expansion, tie-breaking, and playout forks.
    rng: GameRng,

    /// Cooperative cancellation flag, polled once per iteration.
    interrupt: Arc<AtomicBool>,

    /// Last decision's statistics.
    stats: SearchStats,

    /// Last decision's tree (absent before the first search).
    tree: Option<SearchTree<E::State, E::Move>>,

    /// Last decision's summary line.
    analysis: Option<String>,
}

impl<E: GameEngine> UctAgent<E> {
    /// Create a new agent for the given engine.
    pub fn new(engine: E, config: UctConfig) -> Self {
        let player_count = engine.player_count();
        let rng = match config.seed {
            Some(seed) => GameRng::seeded(seed),
            None => GameRng::from_entropy(),
        };
        let pool = TimePool::new(config.global_time_ms);

        Self {
            engine,
            config,
            player: PlayerId::NONE,
            player_count,
            pool,
            rng,
            interrupt: Arc::new(AtomicBool::new(false)),
            stats: SearchStats::default(),
            tree: None,
            analysis: None,
        }
    }

    /// Set which player index this agent plays.
    pub fn init(&mut self, player: PlayerId) {
        self.player = player;
    }

    /// Agent display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        if self.config.clock_bonus_enabled {
            "MCTScbt"
        } else {
            "MCTS"
        }
    }

    /// Whether this agent supports the configured engine's game.
    ///
    /// Only strictly alternating-move games are supported; stochastic
    /// games are accepted while `allow_stochastic` is set (the default).
    #[must_use]
    pub fn supports(&self) -> bool {
        if !self.engine.is_alternating() {
            return false;
        }
        if self.engine.is_stochastic() && !self.config.allow_stochastic {
            return false;
        }
        true
    }

    /// Handle for requesting cooperative cancellation.
    ///
    /// Setting the flag stops the decision loop at the next iteration
    /// boundary; no partial iteration is left inconsistent.
    #[must_use]
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    /// Choose one move for the current position.
    ///
    /// The per-call limits are accepted for interface compatibility and
    /// unused: the time or iteration budget comes from [`UctConfig`], and
    /// playouts use the configured ply cutoff rather than `_max_depth`.
    ///
    /// Returns `None` only for a terminal root or when the interrupt flag
    /// was already set before the first iteration.
    pub fn select_action(
        &mut self,
        state: &E::State,
        _max_seconds: f64,
        _max_iterations: u32,
        _max_depth: i32,
    ) -> Option<E::Move> {
        let start = Instant::now();
        self.stats.reset();
        self.analysis = None;

        let root_state = state.clone();
        let root_terminal = self.engine.is_terminal(&root_state);
        let legal_moves = if root_terminal {
            Vec::new()
        } else {
            self.engine.legal_moves(&root_state)
        };

        // Forced move: skip the search entirely (and the pool charge).
        if legal_moves.len() == 1 {
            self.tree = None;
            return legal_moves.into_iter().next();
        }

        let root = UctNode::root(root_state, root_terminal, legal_moves, self.player_count);
        let mut tree = SearchTree::new(root, self.player_count);

        if root_terminal {
            self.tree = Some(tree);
            return None;
        }

        let (mode, budget) = if self.config.time_based {
            (BudgetMode::Time, self.config.thinking_time_ms)
        } else {
            (BudgetMode::Iterations, u64::from(self.config.max_iterations))
        };
        let mut controller =
            ResourceController::new(mode, budget, self.config.clock_bonus_enabled);
        let mut estimator = BonusEstimator::default();
        let moves_already_done = self.engine.moves_made_by(state, self.player);

        loop {
            if self.interrupt.load(Ordering::Relaxed) {
                break;
            }
            // Always complete at least one iteration, even on an
            // exhausted budget, so the root is never left childless.
            if self.stats.iterations > 0 && controller.remaining() == 0 {
                break;
            }

            if let Some(bonus) =
                controller.maybe_grant_bonus(self.pool.available_ms(), &estimator)
            {
                self.stats.bonus_ms = bonus;
                debug!(
                    "clock bonus: granted {} ms (pool {} ms, avg own moves {:.0}, {} valid playouts)",
                    bonus,
                    self.pool.available_ms(),
                    estimator.average(),
                    estimator.valid_playouts(),
                );
            }

            let leaf = tree.select_and_expand(&self.engine, &mut self.rng);
            if tree.get(leaf).visit_count == 0 {
                self.stats.nodes_expanded += 1;
            }
            let utilities = self.simulate(
                &tree,
                leaf,
                controller.bonus_armed(),
                moves_already_done,
                &mut estimator,
            );
            tree.backpropagate(leaf, &utilities);

            controller.consume_tick();
            self.stats.iterations += 1;
        }

        self.pool.charge(start.elapsed());
        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            "decision finished after {} iterations ({}/{} resource used)",
            self.stats.iterations,
            controller.used(),
            controller.budget(),
        );

        let selected = tree.robust_child(&mut self.rng);
        if let Some(id) = selected {
            let child = tree.get(id);
            self.analysis = Some(format!(
                "{}: {} it (selected it {}, value {:.4} after {:.4} seconds)",
                self.name(),
                tree.root_node().visit_count,
                child.visit_count,
                child.mean_score(self.player),
                start.elapsed().as_secs_f64(),
            ));
        }

        let chosen = selected.and_then(|id| tree.get(id).move_from_parent.clone());
        self.tree = Some(tree);
        chosen
    }

    /// Simulation driver: resolve a leaf to shaped per-player utilities.
    ///
    /// Terminal leaves are used as-is; otherwise a private state copy is
    /// advanced by the engine's random playout to termination or the ply
    /// cutoff. Utilities are shaped once by `0.999^plies_added` before
    /// backpropagation. While the clock bonus is armed, terminal-reaching
    /// playouts feed the move-rate estimator; cutoff playouts do not.
    fn simulate(
        &mut self,
        tree: &SearchTree<E::State, E::Move>,
        leaf: NodeId,
        bonus_armed: bool,
        moves_already_done: usize,
        estimator: &mut BonusEstimator,
    ) -> PlayerMap<f64> {
        let node = tree.get(leaf);
        let pre_plies = self.engine.ply_count(&node.state);

        let (mut utilities, plies_added) = if node.is_terminal {
            if bonus_armed {
                self.record_own_moves(&node.state, moves_already_done, estimator);
            }
            (self.engine.utilities(&node.state), 0)
        } else {
            let mut end_state = node.state.clone();
            let mut playout_rng = self.rng.fork();
            self.engine.random_playout(
                &mut end_state,
                self.config.playout_cutoff_plies,
                &mut playout_rng,
            );
            self.stats.playouts += 1;

            let plies_added = (self.engine.ply_count(&end_state) - pre_plies) as u32;
            if bonus_armed && self.engine.is_terminal(&end_state) {
                self.record_own_moves(&end_state, moves_already_done, estimator);
            }
            (self.engine.utilities(&end_state), plies_added)
        };

        shape_utilities(&mut utilities, plies_added);
        utilities
    }

    /// Count the configured player's moves beyond the real game history.
    fn record_own_moves(
        &self,
        end_state: &E::State,
        moves_already_done: usize,
        estimator: &mut BonusEstimator,
    ) {
        let own = self
            .engine
            .moves_made_by(end_state, self.player)
            .saturating_sub(moves_already_done);
        estimator.record_playout(own as u64);
    }

    /// Human-readable summary of the last searched decision.
    #[must_use]
    pub fn analysis_report(&self) -> Option<&str> {
        self.analysis.as_deref()
    }

    /// Get the last decision's statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the last decision's tree (absent before the first search and
    /// after a forced-move short-circuit).
    #[must_use]
    pub fn tree(&self) -> Option<&SearchTree<E::State, E::Move>> {
        self.tree.as_ref()
    }

    /// Milliseconds left in the lifetime time pool.
    #[must_use]
    pub fn time_pool_ms(&self) -> i64 {
        self.pool.available_ms()
    }

    /// Get the engine reference.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Get the configuration.
    pub fn config(&self) -> &UctConfig {
        &self.config
    }
}

/// Apply the one-shot playout-length shaping: `utility *= 0.999^plies`.
fn shape_utilities(utilities: &mut PlayerMap<f64>, plies_added: u32) {
    let shaping = UTILITY_DECAY.powi(plies_added as i32);
    for player in PlayerId::all(utilities.player_count()) {
        utilities[player] *= shaping;
    }
}
