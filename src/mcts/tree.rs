//! Arena-based search tree and its traversal operations.
//!
//! Nodes live in a flat `Vec` and reference each other by `NodeId` index,
//! parent links included, so the tree owns all nodes top-down. A fresh tree
//! is built for every decision; nothing is reused across decisions.

use crate::core::{GameRng, PlayerMap};
use crate::rules::GameEngine;

use super::node::{NodeId, UctNode};
use super::policy::{ucb1_value, Reservoir};

/// Per-level discount applied while walking utilities toward the root, and
/// per-ply shaping base for playout length.
pub const UTILITY_DECAY: f64 = 0.999;

/// Arena-based search tree.
#[derive(Clone, Debug)]
pub struct SearchTree<S, M> {
    nodes: Vec<UctNode<S, M>>,
    root: NodeId,
    player_count: usize,
}

impl<S: Clone, M: Clone + PartialEq> SearchTree<S, M> {
    /// Create a tree holding only the given root node.
    pub fn new(root: UctNode<S, M>, player_count: usize) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(1024),
            root: NodeId::new(0),
            player_count,
        };
        tree.nodes.push(root);
        tree
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &UctNode<S, M> {
        &self.nodes[id.raw() as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut UctNode<S, M> {
        &mut self.nodes[id.raw() as usize]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: UctNode<S, M>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Player count for this tree.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &UctNode<S, M> {
        self.get(self.root)
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &UctNode<S, M>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// One descent from the root: returns the leaf for this iteration.
    ///
    /// Stops at the first terminal node, or expands one uniformly random
    /// unexpanded move (the new child is the leaf, visit count 0).
    /// UCB1 selection only ever runs on nodes whose unexpanded moves are
    /// exhausted, so no child it scores can have zero visits.
    pub fn select_and_expand<E>(&mut self, engine: &E, rng: &mut GameRng) -> NodeId
    where
        E: GameEngine<State = S, Move = M>,
    {
        let mut current = self.root;
        loop {
            if self.get(current).is_terminal {
                return current;
            }
            if !self.get(current).unexpanded_moves.is_empty() {
                return self.expand(current, engine, rng);
            }
            match self.best_ucb1_child(current, engine, rng) {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Turn one unexpanded move of `parent` into a child node.
    fn expand<E>(&mut self, parent: NodeId, engine: &E, rng: &mut GameRng) -> NodeId
    where
        E: GameEngine<State = S, Move = M>,
    {
        let pick = rng.gen_range_usize(0..self.get(parent).unexpanded_moves.len());

        let node = self.get_mut(parent);
        let mv = node.unexpanded_moves.swap_remove(pick);
        let mut state = node.state.clone();
        engine.apply(&mut state, &mv);

        let is_terminal = engine.is_terminal(&state);
        let unexpanded = if is_terminal {
            Vec::new()
        } else {
            engine.legal_moves(&state)
        };

        let child = UctNode::new(
            parent,
            Some(mv),
            state,
            is_terminal,
            unexpanded,
            self.player_count,
        );
        let child_id = self.alloc(child);
        self.get_mut(parent).children.push(child_id);
        child_id
    }

    /// UCB1 child selection with uniform random tie-breaking.
    ///
    /// Scores each child for the mover at `parent`. Returns `None` only
    /// for childless nodes.
    pub fn best_ucb1_child<E>(
        &self,
        parent: NodeId,
        engine: &E,
        rng: &mut GameRng,
    ) -> Option<NodeId>
    where
        E: GameEngine<State = S, Move = M>,
    {
        let node = self.get(parent);
        let mover = engine.mover(&node.state);
        let two_parent_log = 2.0 * f64::from(node.visit_count.max(1)).ln();

        let mut pick = Reservoir::new();
        for &child_id in &node.children {
            let child = self.get(child_id);
            let value = ucb1_value(child.score_sums[mover], child.visit_count, two_parent_log);
            pick.offer(child_id, value, rng);
        }
        pick.into_best()
    }

    /// Root child with the maximum visit count (robust-child policy),
    /// ties broken uniformly at random.
    pub fn robust_child(&self, rng: &mut GameRng) -> Option<NodeId> {
        let mut pick = Reservoir::new();
        for &child_id in &self.root_node().children {
            pick.offer(child_id, f64::from(self.get(child_id).visit_count), rng);
        }
        pick.into_best()
    }

    /// Walk shaped utilities from `leaf` up to the root.
    ///
    /// Each visited node gains one visit and `utility * discount` per
    /// player; the discount starts at 1 at the leaf and shrinks by
    /// [`UTILITY_DECAY`] per level, so the root receives the
    /// least-decayed contribution.
    pub fn backpropagate(&mut self, leaf: NodeId, utilities: &PlayerMap<f64>) {
        let mut discount = 1.0;
        let mut current = leaf;

        while !current.is_none() {
            let node = self.get_mut(current);
            node.visit_count += 1;
            for (player, utility) in utilities.iter() {
                node.score_sums[player] += utility * discount;
            }
            current = node.parent;
            discount *= UTILITY_DECAY;
        }
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let terminal_count = self.nodes.iter().filter(|n| n.is_terminal).count();
        let fully_expanded = self
            .nodes
            .iter()
            .filter(|n| !n.is_terminal && n.is_fully_expanded())
            .count();
        let unexpanded_moves: usize =
            self.nodes.iter().map(|n| n.unexpanded_moves.len()).sum();

        TreeStats {
            node_count: self.nodes.len(),
            terminal_count,
            fully_expanded,
            unexpanded_moves,
        }
    }
}

/// Statistics about the search tree.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Number of terminal nodes.
    pub terminal_count: usize,

    /// Non-terminal nodes with every legal move expanded.
    pub fully_expanded: usize,

    /// Legal moves across all nodes not yet turned into children.
    pub unexpanded_moves: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::games::binary::{BinaryChoiceGame, Choice};

    fn fresh_tree(
        game: &BinaryChoiceGame,
    ) -> SearchTree<crate::games::binary::BinaryState, Choice> {
        let state = game.initial_state();
        let root = UctNode::root(
            state.clone(),
            game.is_terminal(&state),
            game.legal_moves(&state),
            game.player_count(),
        );
        SearchTree::new(root, game.player_count())
    }

    #[test]
    fn test_tree_new() {
        let game = BinaryChoiceGame::new(3);
        let tree = fresh_tree(&game);

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.player_count(), 2);
        assert_eq!(tree.root(), NodeId::new(0));
        assert_eq!(tree.root_node().unexpanded_moves.len(), 2);
    }

    #[test]
    fn test_expansion_exhausts_moves_before_ucb1() {
        let game = BinaryChoiceGame::new(3);
        let mut rng = GameRng::seeded(5);
        let mut tree = fresh_tree(&game);

        // First two descents must expand the root's two moves.
        let first = tree.select_and_expand(&game, &mut rng);
        tree.backpropagate(first, &game.utilities(&tree.get(first).state));
        assert_eq!(tree.root_node().unexpanded_moves.len(), 1);

        let second = tree.select_and_expand(&game, &mut rng);
        tree.backpropagate(second, &game.utilities(&tree.get(second).state));
        assert!(tree.root_node().is_fully_expanded());
        assert_eq!(tree.root_node().children.len(), 2);
        assert_ne!(first, second);
    }

    #[test]
    fn test_expanded_leaf_starts_unvisited() {
        let game = BinaryChoiceGame::new(3);
        let mut rng = GameRng::seeded(5);
        let mut tree = fresh_tree(&game);

        let leaf = tree.select_and_expand(&game, &mut rng);
        assert_eq!(tree.get(leaf).visit_count, 0);
        assert_eq!(tree.get(leaf).parent, tree.root());
    }

    #[test]
    fn test_ucb1_descends_into_visited_children_only() {
        let game = BinaryChoiceGame::new(4);
        let mut rng = GameRng::seeded(7);
        let mut tree = fresh_tree(&game);

        for _ in 0..50 {
            let leaf = tree.select_and_expand(&game, &mut rng);
            let utilities = game.utilities(&tree.get(leaf).state);
            tree.backpropagate(leaf, &utilities);
        }

        // Every child of every fully expanded node has been visited, so
        // UCB1 never divides by a zero visit count.
        for (_, node) in tree.iter() {
            if !node.is_terminal && node.is_fully_expanded() {
                for &child in &node.children {
                    assert!(tree.get(child).visit_count > 0);
                }
            }
        }
    }

    #[test]
    fn test_backpropagate_discounts_per_level() {
        let game = BinaryChoiceGame::new(2);
        let mut rng = GameRng::seeded(3);
        let mut tree = fresh_tree(&game);

        // Build a 2-deep path by hand: root -> child -> grandchild.
        let child = tree.select_and_expand(&game, &mut rng);
        tree.backpropagate(child, &PlayerMap::with_value(2, 0.0));
        // Descend again until we land below `child` or a sibling; force a
        // direct path instead by expanding from the child.
        let grandchild = {
            let pick = 0;
            let node = tree.get_mut(child);
            let mv = node.unexpanded_moves.swap_remove(pick);
            let mut state = node.state.clone();
            game.apply(&mut state, &mv);
            let terminal = game.is_terminal(&state);
            let n = UctNode::new(child, Some(mv), state, terminal, vec![], 2);
            let id = tree.alloc(n);
            tree.get_mut(child).children.push(id);
            id
        };

        // Shaped utility 0.998001 at the leaf (1.0 * 0.999^2), per-level
        // decay 0.999 on the way up.
        let shaped = 0.998_001;
        let utilities = PlayerMap::new(2, |p| if p.index() == 1 { shaped } else { -shaped });
        tree.backpropagate(grandchild, &utilities);

        let p1 = PlayerId::new(1);
        assert!((tree.get(grandchild).score_sums[p1] - shaped).abs() < 1e-12);
        assert!((tree.get(child).score_sums[p1] - shaped * 0.999).abs() < 1e-12);
        assert!(
            (tree.root_node().score_sums[p1] - shaped * 0.999 * 0.999).abs() < 1e-12
        );
    }

    #[test]
    fn test_robust_child_prefers_most_visited() {
        let game = BinaryChoiceGame::new(3);
        let mut rng = GameRng::seeded(11);
        let mut tree = fresh_tree(&game);

        let a = tree.select_and_expand(&game, &mut rng);
        tree.backpropagate(a, &PlayerMap::with_value(2, 0.0));
        let b = tree.select_and_expand(&game, &mut rng);
        tree.backpropagate(b, &PlayerMap::with_value(2, 0.0));

        // Tilt visits toward `b`.
        tree.backpropagate(b, &PlayerMap::with_value(2, 0.0));
        tree.backpropagate(b, &PlayerMap::with_value(2, 0.0));

        assert_eq!(tree.robust_child(&mut rng), Some(b));
    }

    #[test]
    fn test_unexpanded_moves_never_regrow() {
        let game = BinaryChoiceGame::new(4);
        let mut rng = GameRng::seeded(13);
        let mut tree = fresh_tree(&game);

        let mut last_counts: Vec<usize> = Vec::new();
        for _ in 0..60 {
            let leaf = tree.select_and_expand(&game, &mut rng);
            let utilities = game.utilities(&tree.get(leaf).state);
            tree.backpropagate(leaf, &utilities);

            for (i, (_, node)) in tree.iter().enumerate() {
                let len = node.unexpanded_moves.len();
                if i < last_counts.len() {
                    assert!(len <= last_counts[i]);
                    last_counts[i] = len;
                } else {
                    last_counts.push(len);
                }
            }
        }
    }

    #[test]
    fn test_tree_stats() {
        let game = BinaryChoiceGame::new(2);
        let mut rng = GameRng::seeded(17);
        let mut tree = fresh_tree(&game);

        for _ in 0..30 {
            let leaf = tree.select_and_expand(&game, &mut rng);
            let utilities = game.utilities(&tree.get(leaf).state);
            tree.backpropagate(leaf, &utilities);
        }

        let stats = tree.stats();
        // Depth-2 binary game: 7 states in the full tree.
        assert_eq!(stats.node_count, 7);
        assert_eq!(stats.terminal_count, 4);
        assert_eq!(stats.fully_expanded, 3);
        assert_eq!(stats.unexpanded_moves, 0);
    }
}
