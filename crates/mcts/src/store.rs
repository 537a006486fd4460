//! Arena-allocated node store with transposition merging.
//!
//! Nodes live in a `Vec` and refer to each other by [`NodeId`]. A key index
//! maps each canonical position to its single node, so positions reached
//! through different move orders share their statistics.

use crate::node::{Node, NodeId};
use std::collections::HashMap;
use tracing::debug;
use uct_core::GameState;

/// Owns every node created for one player's searches during one game.
///
/// Nodes are created lazily and never removed; call [`NodeStore::clear`]
/// between games.
#[derive(Debug)]
pub struct NodeStore<S: GameState> {
    nodes: Vec<Node<S>>,
    index: HashMap<String, NodeId>,
}

impl<S: GameState> NodeStore<S> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Return the node for `state`, creating it from a copy of `state` if the
    /// position has not been seen before.
    pub fn get_or_create(&mut self, state: &S) -> NodeId {
        let key = state.canonical_key();
        if let Some(&id) = self.index.get(&key) {
            return id;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(state.clone()));
        self.index.insert(key, id);
        id
    }

    /// Look up the node for `state` without creating it.
    pub fn get(&self, state: &S) -> Option<NodeId> {
        self.index.get(&state.canonical_key()).copied()
    }

    /// Link `id` to a child node for every legal action of its position.
    ///
    /// Children are resolved through [`NodeStore::get_or_create`], so an
    /// existing node is reused for a transposed position. Expanding a node
    /// twice rebuilds the same children list.
    pub fn expand(&mut self, id: NodeId) {
        let parent = self.node(id).state.clone();
        let children: Vec<(S::Action, NodeId)> = parent
            .actions()
            .into_iter()
            .map(|action| {
                let mut child = parent.clone();
                child.apply(action);
                (action, self.get_or_create(&child))
            })
            .collect();

        self.node_mut(id).children = children;
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId was not issued by this store.
    pub fn node(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId was not issued by this store.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[id.0]
    }

    /// Remove every node, e.g. when a game is over.
    pub fn clear(&mut self) {
        debug!(nodes = self.nodes.len(), "clearing node store");
        self.nodes.clear();
        self.index.clear();
    }

    /// Get the number of nodes in the store.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the store has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<S: GameState> Default for NodeStore<S> {
    fn default() -> Self {
        Self::new()
    }
}
