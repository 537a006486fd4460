//! Search node types.
//!
//! Nodes live in the arena of a [`NodeStore`](crate::store::NodeStore) and
//! refer to each other by index, so there are no parent pointers and no
//! shared ownership between nodes.

use uct_core::GameState;

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in a store.
/// Handles are only meaningful for the store that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A vertex of the search graph.
///
/// Each node wraps one game position. Because identical positions are merged
/// by the store, a node may be the child of several other nodes.
#[derive(Clone, Debug)]
pub struct Node<S: GameState> {
    /// The position this node represents.
    pub state: S,

    /// Children as (action, node) pairs, in action enumeration order.
    pub(crate) children: Vec<(S::Action, NodeId)>,

    score: f64,
    traversals: u32,
}

impl<S: GameState> Node<S> {
    /// Create an unvisited, unexpanded node.
    pub fn new(state: S) -> Self {
        Self {
            state,
            children: Vec::new(),
            score: 0.0,
            traversals: 0,
        }
    }

    /// Record one visit with the given reward.
    pub fn update(&mut self, reward: f64) {
        self.score += reward;
        self.traversals += 1;
    }

    /// Accumulated reward.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Number of times this node was visited.
    pub fn traversals(&self) -> u32 {
        self.traversals
    }

    /// Mean reward per visit.
    ///
    /// Returns 0.0 if the node has never been visited.
    pub fn win_rate(&self) -> f64 {
        if self.traversals == 0 {
            0.0
        } else {
            self.score / self.traversals as f64
        }
    }

    /// Whether the node has been expanded into at least one child.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Children as (action, node) pairs, in action enumeration order.
    pub fn children(&self) -> &[(S::Action, NodeId)] {
        &self.children
    }

    /// Look up the child reached by `action`.
    pub fn child(&self, action: S::Action) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, id)| *id)
    }
}
