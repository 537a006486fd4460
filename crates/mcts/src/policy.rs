//! Tree and score policies.
//!
//! Policies are picked by name once, when the search is configured, and are
//! plain enums afterwards. An unknown name is a configuration error.
//!
//! - [`TreePolicy`] chooses which child to descend into during a search.
//! - [`best`] / [`worst`] pick the final move after the budget is spent.
//! - [`ScorePolicy`] turns a win/loss into the reward added to a node.

use crate::node::NodeId;
use crate::store::NodeStore;
use std::fmt;
use std::str::FromStr;
use uct_core::{GameState, UctError};

/// Selection rule applied while descending the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TreePolicy {
    /// UCT: win rate plus `c * sqrt(ln(N) / n)`, with unvisited children first.
    #[default]
    Uct,

    /// Exploration term only: `c * sqrt(ln(N) / (n + 1))`.
    ///
    /// This never rewards a high win rate, so it spreads visits over the
    /// children according to visit counts alone. It is a separate strategy,
    /// not a weaker UCT.
    ExplorationOnly,
}

impl TreePolicy {
    /// Registry of accepted names.
    const NAMES: &'static [(&'static str, TreePolicy)] = &[
        ("uct", TreePolicy::Uct),
        ("uct-wiki", TreePolicy::Uct),
        ("exploration", TreePolicy::ExplorationOnly),
        ("uct-lecture", TreePolicy::ExplorationOnly),
    ];

    /// Canonical name of the policy.
    pub fn name(self) -> &'static str {
        match self {
            TreePolicy::Uct => "uct",
            TreePolicy::ExplorationOnly => "exploration",
        }
    }

    /// Pick the action to follow from `id`, or `None` if it has no children.
    ///
    /// Children are scanned in enumeration order and the first of several
    /// equal scores wins. A node that was never visited returns its first
    /// child.
    pub fn select<S: GameState>(
        self,
        store: &NodeStore<S>,
        id: NodeId,
        exploration: f64,
    ) -> Option<S::Action> {
        let node = store.node(id);
        let (first_action, _) = node.children().first()?;

        if node.traversals() == 0 {
            return Some(*first_action);
        }

        let log_parent = (node.traversals() as f64).ln();
        let mut best_action = None;
        let mut best_score = f64::NEG_INFINITY;

        for (action, child_id) in node.children() {
            let child = store.node(*child_id);

            let score = match self {
                TreePolicy::Uct => {
                    if child.traversals() == 0 {
                        return Some(*action);
                    }
                    child.win_rate()
                        + exploration * (log_parent / child.traversals() as f64).sqrt()
                }
                TreePolicy::ExplorationOnly => {
                    exploration * (log_parent / (child.traversals() as f64 + 1.0)).sqrt()
                }
            };

            if score > best_score {
                best_score = score;
                best_action = Some(*action);
            }
        }

        best_action
    }
}

impl FromStr for TreePolicy {
    type Err = UctError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, policy)| *policy)
            .ok_or_else(|| UctError::UnknownTreePolicy(name.to_string()))
    }
}

impl fmt::Display for TreePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the action whose child has the highest win rate (pure exploitation).
///
/// The first child wins ties. Returns `None` if the node has no children.
pub fn best<S: GameState>(store: &NodeStore<S>, id: NodeId) -> Option<S::Action> {
    extreme(store, id, |candidate, current| candidate > current)
}

/// Returns the action whose child has the lowest win rate.
///
/// The first child wins ties. Returns `None` if the node has no children.
pub fn worst<S: GameState>(store: &NodeStore<S>, id: NodeId) -> Option<S::Action> {
    extreme(store, id, |candidate, current| candidate < current)
}

fn extreme<S, F>(store: &NodeStore<S>, id: NodeId, better: F) -> Option<S::Action>
where
    S: GameState,
    F: Fn(f64, f64) -> bool,
{
    let mut chosen: Option<(S::Action, f64)> = None;

    for (action, child_id) in store.node(id).children() {
        let rate = store.node(*child_id).win_rate();
        let replace = match chosen {
            Some((_, current)) => better(rate, current),
            None => true,
        };
        if replace {
            chosen = Some((*action, rate));
        }
    }

    chosen.map(|(action, _)| action)
}

/// Reward shaping applied during backpropagation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScorePolicy {
    /// 1.0 for a win, 0.0 otherwise. Win rates stay in [0, 1].
    #[default]
    ZeroOne,

    /// 1.0 for a win, -1.0 otherwise. Win rates lie in [-1, 1].
    PlusMinus,
}

impl ScorePolicy {
    const NAMES: &'static [(&'static str, ScorePolicy)] = &[
        ("zero-one", ScorePolicy::ZeroOne),
        ("zero_one", ScorePolicy::ZeroOne),
        ("plus-minus", ScorePolicy::PlusMinus),
    ];

    /// Canonical name of the policy.
    pub fn name(self) -> &'static str {
        match self {
            ScorePolicy::ZeroOne => "zero-one",
            ScorePolicy::PlusMinus => "plus-minus",
        }
    }

    /// Reward for a node whose mover did or did not win.
    pub fn reward(self, won: bool) -> f64 {
        match (self, won) {
            (_, true) => 1.0,
            (ScorePolicy::ZeroOne, false) => 0.0,
            (ScorePolicy::PlusMinus, false) => -1.0,
        }
    }
}

impl FromStr for ScorePolicy {
    type Err = UctError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, policy)| *policy)
            .ok_or_else(|| UctError::UnknownScorePolicy(name.to_string()))
    }
}

impl fmt::Display for ScorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
