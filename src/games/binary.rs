//! A tiny two-player game for tests and examples.
//!
//! Players alternate picking `Left` or `Right` for a fixed number of
//! plies. The very first pick decides the game: `Left` wins for player 1,
//! `Right` wins for player 2. The constant branching factor of 2 and the
//! known-best first move make search behavior easy to assert on.

use crate::core::{PlayerId, PlayerMap};
use crate::rules::GameEngine;

/// A move in the binary-choice game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Left,
    Right,
}

/// Game state: the sequence of picks made so far.
#[derive(Clone, Debug)]
pub struct BinaryState {
    history: Vec<(PlayerId, Choice)>,
}

impl BinaryState {
    /// The picks made so far, in order.
    #[must_use]
    pub fn history(&self) -> &[(PlayerId, Choice)] {
        &self.history
    }
}

/// Binary-choice game of a fixed depth.
#[derive(Clone, Debug)]
pub struct BinaryChoiceGame {
    depth: usize,
}

impl BinaryChoiceGame {
    /// Create a game lasting `depth` plies.
    #[must_use]
    pub fn new(depth: usize) -> Self {
        assert!(depth > 0, "game needs at least one ply");
        Self { depth }
    }

    /// The empty starting position.
    #[must_use]
    pub fn initial_state(&self) -> BinaryState {
        BinaryState {
            history: Vec::new(),
        }
    }

    /// The winner at a finished state: decided by the first pick.
    fn winner(&self, state: &BinaryState) -> Option<PlayerId> {
        match state.history.first() {
            Some((_, Choice::Left)) => Some(PlayerId::new(1)),
            Some((_, Choice::Right)) => Some(PlayerId::new(2)),
            None => None,
        }
    }
}

impl GameEngine for BinaryChoiceGame {
    type State = BinaryState;
    type Move = Choice;

    fn player_count(&self) -> usize {
        2
    }

    fn legal_moves(&self, state: &BinaryState) -> Vec<Choice> {
        if self.is_terminal(state) {
            vec![]
        } else {
            vec![Choice::Left, Choice::Right]
        }
    }

    fn apply(&self, state: &mut BinaryState, mv: &Choice) {
        let mover = self.mover(state);
        state.history.push((mover, *mv));
    }

    fn is_terminal(&self, state: &BinaryState) -> bool {
        state.history.len() >= self.depth
    }

    fn ply_count(&self, state: &BinaryState) -> usize {
        state.history.len()
    }

    fn mover(&self, state: &BinaryState) -> PlayerId {
        PlayerId::new((state.history.len() % 2) as u8 + 1)
    }

    fn moves_made_by(&self, state: &BinaryState, player: PlayerId) -> usize {
        state.history.iter().filter(|(p, _)| *p == player).count()
    }

    fn utilities(&self, state: &BinaryState) -> PlayerMap<f64> {
        match self.winner(state) {
            Some(winner) if self.is_terminal(state) => {
                PlayerMap::new(2, |p| if p == winner { 1.0 } else { -1.0 })
            }
            _ => PlayerMap::with_value(2, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;

    #[test]
    fn test_alternating_movers() {
        let game = BinaryChoiceGame::new(4);
        let mut state = game.initial_state();

        assert_eq!(game.mover(&state), PlayerId::new(1));
        game.apply(&mut state, &Choice::Left);
        assert_eq!(game.mover(&state), PlayerId::new(2));
        game.apply(&mut state, &Choice::Right);
        assert_eq!(game.mover(&state), PlayerId::new(1));
    }

    #[test]
    fn test_first_pick_decides() {
        let game = BinaryChoiceGame::new(2);

        let mut left = game.initial_state();
        game.apply(&mut left, &Choice::Left);
        game.apply(&mut left, &Choice::Right);
        assert!(game.is_terminal(&left));
        assert_eq!(game.utilities(&left)[PlayerId::new(1)], 1.0);
        assert_eq!(game.utilities(&left)[PlayerId::new(2)], -1.0);

        let mut right = game.initial_state();
        game.apply(&mut right, &Choice::Right);
        game.apply(&mut right, &Choice::Left);
        assert_eq!(game.utilities(&right)[PlayerId::new(1)], -1.0);
        assert_eq!(game.utilities(&right)[PlayerId::new(2)], 1.0);
    }

    #[test]
    fn test_non_terminal_utilities_are_zero() {
        let game = BinaryChoiceGame::new(3);
        let mut state = game.initial_state();
        game.apply(&mut state, &Choice::Left);

        assert!(!game.is_terminal(&state));
        assert_eq!(game.utilities(&state)[PlayerId::new(1)], 0.0);
    }

    #[test]
    fn test_moves_made_by() {
        let game = BinaryChoiceGame::new(5);
        let mut state = game.initial_state();
        for mv in [Choice::Left, Choice::Right, Choice::Left] {
            game.apply(&mut state, &mv);
        }

        assert_eq!(game.moves_made_by(&state, PlayerId::new(1)), 2);
        assert_eq!(game.moves_made_by(&state, PlayerId::new(2)), 1);
    }

    #[test]
    fn test_random_playout_reaches_terminal() {
        let game = BinaryChoiceGame::new(6);
        let mut state = game.initial_state();
        let mut rng = GameRng::seeded(9);

        game.random_playout(&mut state, 600, &mut rng);

        assert!(game.is_terminal(&state));
        assert_eq!(game.ply_count(&state), 6);
    }

    #[test]
    fn test_random_playout_respects_cutoff() {
        let game = BinaryChoiceGame::new(50);
        let mut state = game.initial_state();
        let mut rng = GameRng::seeded(9);

        game.random_playout(&mut state, 10, &mut rng);

        assert!(!game.is_terminal(&state));
        assert_eq!(game.ply_count(&state), 10);
    }
}
