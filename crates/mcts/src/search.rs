//! Monte Carlo Tree Search implementation.
//!
//! Each iteration walks the shared node store in four phases:
//!
//! 1. **Selection** - follow the tree policy from the root until a node
//!    without children is reached.
//! 2. **Expansion** - create the children of that node and pick one of them
//!    with the tree policy.
//! 3. **Rollout** - play the picked child out with the evaluator.
//! 4. **Backpropagation** - credit every node on the path whose mover won.
//!
//! A leaf that is already a finished game skips expansion and rollout.

use crate::{
    config::MctsConfig,
    evaluator::Evaluator,
    node::NodeId,
    policy,
    store::NodeStore,
};
use std::marker::PhantomData;
use tracing::{debug, trace};
use uct_core::{GameState, Outcome};

/// Statistics of one root child after a search.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildStats<A> {
    pub action: A,
    pub win_rate: f64,
    pub traversals: u32,
}

/// Result of an MCTS search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<A> {
    /// Child with the highest win rate, or `None` if the root is terminal.
    pub best_action: Option<A>,

    /// Per-child statistics, in action enumeration order.
    pub children: Vec<ChildStats<A>>,

    /// Visits of the root node, including those from earlier searches.
    pub root_traversals: u32,
}

impl<A: Copy> SearchResult<A> {
    /// Statistics of the chosen action.
    pub fn best_stats(&self) -> Option<&ChildStats<A>>
    where
        A: PartialEq,
    {
        let action = self.best_action?;
        self.children.iter().find(|c| c.action == action)
    }
}

/// Monte Carlo Tree Search engine.
///
/// The engine holds no tree of its own: every call works on a caller-owned
/// [`NodeStore`], so statistics gathered for one decision are reused by the
/// next decision in the same game.
///
/// Generic over:
/// - `S`: The game position type
/// - `E`: The evaluation strategy used for rollouts
pub struct Mcts<S: GameState, E: Evaluator<S>> {
    config: MctsConfig,
    evaluator: E,
    _game: PhantomData<S>,
}

impl<S, E> Mcts<S, E>
where
    S: GameState,
    E: Evaluator<S>,
{
    /// Create a new MCTS instance.
    pub fn new(config: MctsConfig, evaluator: E) -> Self {
        Self {
            config,
            evaluator,
            _game: PhantomData,
        }
    }

    /// The configuration driving this engine.
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Run the configured number of iterations from `state` and pick the best action.
    pub fn search(&mut self, store: &mut NodeStore<S>, state: &S) -> SearchResult<S::Action> {
        let root = self.run(store, state, self.config.iterations);
        let node = store.node(root);

        let children = node
            .children()
            .iter()
            .map(|(action, id)| {
                let child = store.node(*id);
                ChildStats {
                    action: *action,
                    win_rate: child.win_rate(),
                    traversals: child.traversals(),
                }
            })
            .collect();

        SearchResult {
            best_action: policy::best(store, root),
            children,
            root_traversals: node.traversals(),
        }
    }

    /// Run `iterations` search passes from `state`, returning its node.
    ///
    /// The loop always completes; there is no early stop.
    pub fn run(&mut self, store: &mut NodeStore<S>, state: &S, iterations: usize) -> NodeId {
        let root = store.get_or_create(state);

        for _ in 0..iterations {
            self.simulate(store, root);
        }

        debug!(
            iterations,
            nodes = store.len(),
            root_traversals = store.node(root).traversals(),
            "search complete"
        );

        root
    }

    /// Run a single simulation: select -> expand -> rollout -> backpropagate.
    fn simulate(&mut self, store: &mut NodeStore<S>, root: NodeId) {
        let mut path = vec![root];
        let mut current = root;

        // SELECT: descend until a node without children
        while store.node(current).has_children() {
            current = self.descend(store, current);
            path.push(current);
        }

        let leaf = &store.node(current).state;
        let outcome = if leaf.is_terminal() {
            leaf.winner()
                .expect("BUG: terminal position reported no winner")
        } else {
            // EXPAND, then step into one of the new children
            store.expand(current);
            assert!(
                store.node(current).has_children(),
                "BUG: non-terminal position has no legal actions"
            );
            let child = self.descend(store, current);
            path.push(child);

            // ROLLOUT
            self.evaluator.evaluate(&store.node(child).state)
        };

        trace!(path_len = path.len(), outcome = %outcome, "simulation complete");

        self.backpropagate(store, &path, outcome);
    }

    /// Apply the tree policy at `id` and return the chosen child.
    fn descend(&self, store: &NodeStore<S>, id: NodeId) -> NodeId {
        // INVARIANT: only called on nodes with children
        let action = self
            .config
            .tree_policy
            .select(store, id, self.config.exploration)
            .expect("BUG: tree policy returned no action for an expanded node");

        store
            .node(id)
            .child(action)
            .expect("BUG: tree policy returned action without child node")
    }

    /// Credit every node on the path whose mover won.
    ///
    /// A node is the position just before `next_player` moves, so it belongs
    /// to the opponent who produced it.
    fn backpropagate(&self, store: &mut NodeStore<S>, path: &[NodeId], outcome: Outcome) {
        for &id in path.iter().rev() {
            let node = store.node_mut(id);
            let won = outcome.credits(node.state.next_player());
            node.update(self.config.score_policy.reward(won));
        }
    }
}
