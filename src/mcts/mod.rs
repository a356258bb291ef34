//! Monte Carlo Tree Search (UCT) for uct-agent.
//!
//! ## Overview
//!
//! One decision per call: a fresh tree is built, grown by budget-gated
//! iterations, and discarded after the move is chosen. Key pieces:
//!
//! - **Arena tree**: nodes addressed by index, parent back-links without
//!   ownership cycles
//! - **UCB1 selection**: expansion exhausts unexpanded moves first, then
//!   `mean + sqrt(2 ln N / n)` with uniform random tie-breaking
//! - **Discounted backpropagation**: playout-length shaping plus a
//!   per-tree-level decay
//! - **Budgets**: wall-clock or iteration mode, cooperative interruption,
//!   and an adaptive one-shot "clock bonus" drawing on a lifetime time
//!   pool
//! - **Robust child**: the most-visited root move is played
//!
//! ## Usage
//!
//! ```
//! use uct_agent::core::PlayerId;
//! use uct_agent::games::binary::BinaryChoiceGame;
//! use uct_agent::mcts::{UctAgent, UctConfig};
//!
//! let game = BinaryChoiceGame::new(4);
//! let state = game.initial_state();
//!
//! // Iteration-budgeted search, seeded for reproducibility.
//! let config = UctConfig::new(false, false)
//!     .with_max_iterations(500)
//!     .with_seed(7);
//! let mut agent = UctAgent::new(game, config);
//! agent.init(PlayerId::new(1));
//!
//! if let Some(choice) = agent.select_action(&state, 1.0, 500, -1) {
//!     println!("playing {:?}", choice);
//! }
//! println!("{}", agent.analysis_report().unwrap_or("no search run"));
//! ```

pub mod budget;
pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use budget::{BonusEstimator, BudgetMode, ResourceController, TimePool};
pub use config::UctConfig;
pub use node::{NodeId, UctNode};
pub use policy::Reservoir;
pub use search::UctAgent;
pub use stats::SearchStats;
pub use tree::{SearchTree, TreeStats, UTILITY_DECAY};
