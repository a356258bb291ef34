//! Game engine trait consumed by the search.
//!
//! The search is game-agnostic: legal-move generation, state transition,
//! terminal detection, utility evaluation, and random playout mechanics all
//! live behind this trait. Games implement `GameEngine` to plug into
//! [`UctAgent`](crate::mcts::UctAgent).

use crate::core::{GameRng, PlayerId, PlayerMap};

/// Game engine trait.
///
/// Games implement this trait to define their rules. The search calls
/// these methods during tree descent and simulation; all of them are
/// assumed to succeed for any valid `(state, move)` pair.
///
/// ## Implementation Notes
///
/// - `State` snapshots must be independently mutable: `apply` on a clone
///   must never affect the original.
/// - `legal_moves` on a terminal state should return an empty vec.
/// - `mover` and `utilities` use 1-based player indices (`PlayerId(1)` is
///   the first player).
pub trait GameEngine {
    /// Owned game-state snapshot.
    type State: Clone;

    /// A legal move.
    type Move: Clone + PartialEq + std::fmt::Debug;

    /// Number of players in the game.
    fn player_count(&self) -> usize;

    /// Whether players move strictly one at a time.
    ///
    /// The agent only supports alternating-move games.
    fn is_alternating(&self) -> bool {
        true
    }

    /// Whether state transitions involve chance events.
    fn is_stochastic(&self) -> bool {
        false
    }

    /// Enumerate all legal moves at a state.
    fn legal_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Apply a move to a state in place.
    ///
    /// Must be deterministic for search consistency.
    fn apply(&self, state: &mut Self::State, mv: &Self::Move);

    /// Check if the game is over at this state.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Number of moves played so far to reach this state.
    fn ply_count(&self, state: &Self::State) -> usize;

    /// Whose turn it is at this state.
    fn mover(&self, state: &Self::State) -> PlayerId;

    /// Number of moves `player` has made in this state's history.
    ///
    /// Feeds the clock-bonus estimate of how many choices the agent still
    /// makes per finished game.
    fn moves_made_by(&self, state: &Self::State, player: PlayerId) -> usize;

    /// Per-player utilities for a finished (or cutoff) state.
    ///
    /// Conventionally in `[-1, 1]`: winners 1.0, losers -1.0, draws 0.0.
    fn utilities(&self, state: &Self::State) -> PlayerMap<f64>;

    /// Advance a state with uniformly random legal moves until it is
    /// terminal or `max_plies` additional moves have been played.
    fn random_playout(&self, state: &mut Self::State, max_plies: u32, rng: &mut GameRng) {
        for _ in 0..max_plies {
            if self.is_terminal(state) {
                return;
            }
            let moves = self.legal_moves(state);
            let Some(mv) = rng.choose(&moves) else {
                return;
            };
            let mv = mv.clone();
            self.apply(state, &mv);
        }
    }
}
