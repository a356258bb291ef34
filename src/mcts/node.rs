//! Search tree node structure.
//!
//! Uses arena-based allocation with index references (NodeId): each node
//! stores its parent's index and the indices of its children, so the arena
//! owns every node top-down and parent back-links never form ownership
//! cycles.

use smallvec::SmallVec;

use crate::core::{PlayerId, PlayerMap};

/// Index into the SearchTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A node in the search tree.
///
/// Owns an independently mutable snapshot of the game state it represents.
/// Created exactly once when expansion reaches its move; mutated only by
/// backpropagation (statistics) and expansion (shrinking
/// `unexpanded_moves`).
#[derive(Clone, Debug)]
pub struct UctNode<S, M> {
    /// Parent node (NONE for the root).
    pub parent: NodeId,

    /// The move that produced this node (`None` for the root).
    pub move_from_parent: Option<M>,

    /// Game state at this node.
    pub state: S,

    /// Game over at this state?
    pub is_terminal: bool,

    /// Completed iterations whose selection path passed through here.
    pub visit_count: u32,

    /// Accumulated discounted utility per player (1-based, slot 0 unused).
    pub score_sums: PlayerMap<f64>,

    /// Legal moves not yet turned into children. Shrinks, never regrows.
    pub unexpanded_moves: Vec<M>,

    /// Child node indices, append-only.
    /// SmallVec optimizes for typical branching factor < 8.
    pub children: SmallVec<[NodeId; 8]>,
}

impl<S, M> UctNode<S, M> {
    /// Create a new node.
    pub fn new(
        parent: NodeId,
        move_from_parent: Option<M>,
        state: S,
        is_terminal: bool,
        unexpanded_moves: Vec<M>,
        player_count: usize,
    ) -> Self {
        Self {
            parent,
            move_from_parent,
            state,
            is_terminal,
            visit_count: 0,
            score_sums: PlayerMap::with_value(player_count, 0.0),
            unexpanded_moves,
            children: SmallVec::new(),
        }
    }

    /// Create a root node.
    pub fn root(state: S, is_terminal: bool, legal_moves: Vec<M>, player_count: usize) -> Self {
        Self::new(NodeId::NONE, None, state, is_terminal, legal_moves, player_count)
    }

    /// Check if this is the root (no parent, no producing move).
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Check if every legal move has been turned into a child.
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        self.unexpanded_moves.is_empty()
    }

    /// Mean accumulated score for a player.
    #[must_use]
    pub fn mean_score(&self, player: PlayerId) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.score_sums[player] / f64::from(self.visit_count)
        }
    }
}
