//! # uct-agent
//!
//! Budgeted UCT/MCTS action selection for turn-based, possibly
//! stochastic, perfect-information games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: rules live behind the [`rules::GameEngine`]
//!    trait; the search never inspects states or moves.
//!
//! 2. **One decision, one tree**: every `select_action` call builds a
//!    fresh arena-allocated tree and discards it afterwards.
//!
//! 3. **Explicit budgets**: wall-clock or iteration budgets are
//!    configuration, not ambient state, and an agent-lifetime time pool
//!    funds the adaptive clock bonus.
//!
//! ## Modules
//!
//! - `core`: player indexing, per-player maps, forkable RNG
//! - `rules`: the `GameEngine` trait games implement
//! - `mcts`: tree, selection policies, budgets, and the decision loop
//! - `games`: built-in games for tests and examples

pub mod core;
pub mod games;
pub mod mcts;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{GameRng, PlayerId, PlayerMap};

pub use crate::rules::GameEngine;

pub use crate::mcts::{
    BonusEstimator, BudgetMode, NodeId, ResourceController, SearchStats, SearchTree, TimePool,
    TreeStats, UctAgent, UctConfig, UctNode,
};
