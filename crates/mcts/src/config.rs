//! MCTS configuration parameters.
//!
//! These parameters control the behavior of the Monte Carlo Tree Search algorithm.

use crate::policy::{ScorePolicy, TreePolicy};
use uct_core::{Result, UctError};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct MctsConfig {
    /// Number of search iterations per decision.
    pub iterations: usize,

    /// Exploration constant `c` of the tree policy.
    pub exploration: f64,

    /// Rule used to descend the tree.
    pub tree_policy: TreePolicy,

    /// Reward shaping applied during backpropagation.
    pub score_policy: ScorePolicy,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration: 1.0,
            tree_policy: TreePolicy::Uct,
            score_policy: ScorePolicy::ZeroOne,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of iterations.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Create a config from policy names, failing on an unknown name.
    pub fn from_names(tree_policy: &str, score_policy: &str) -> Result<Self> {
        Ok(Self {
            tree_policy: tree_policy.parse()?,
            score_policy: score_policy.parse()?,
            ..Default::default()
        })
    }

    /// Set the exploration constant.
    pub fn exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Set the tree policy.
    pub fn tree_policy(mut self, policy: TreePolicy) -> Self {
        self.tree_policy = policy;
        self
    }

    /// Set the score policy.
    pub fn score_policy(mut self, policy: ScorePolicy) -> Self {
        self.score_policy = policy;
        self
    }

    /// Set the iteration budget.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Check that the parameters can drive a search.
    pub fn validate(&self) -> Result<()> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(UctError::InvalidParameter(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration
            )));
        }
        Ok(())
    }
}
