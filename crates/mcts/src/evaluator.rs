//! Leaf evaluation for MCTS.
//!
//! The `Evaluator` trait is the seam between the tree search and the way a
//! freshly expanded leaf is scored. The search only needs the outcome of one
//! finished game per iteration; `RolloutEvaluator` obtains it by random play.

use rand::Rng;
use std::cell::RefCell;
use uct_core::{GameState, Outcome};

/// Trait for evaluating game positions.
pub trait Evaluator<S: GameState> {
    /// Play the position out and report the result of the finished game.
    ///
    /// Must not modify `state`.
    fn evaluate(&self, state: &S) -> Outcome;
}

/// Evaluator using uniformly random playouts.
///
/// Each evaluation clones the position and plays random legal actions until
/// the game ends. The search tree is never touched.
pub struct RolloutEvaluator<R: Rng> {
    /// Random number generator (wrapped in RefCell for interior mutability).
    rng: RefCell<R>,
}

impl<R: Rng> RolloutEvaluator<R> {
    /// Create a new rollout evaluator.
    pub fn new(rng: R) -> Self {
        Self {
            rng: RefCell::new(rng),
        }
    }
}

impl<S: GameState, R: Rng> Evaluator<S> for RolloutEvaluator<R> {
    fn evaluate(&self, state: &S) -> Outcome {
        let mut state = state.clone();
        let mut rng = self.rng.borrow_mut();

        while !state.is_terminal() {
            let actions = state.actions();
            // INVARIANT: only terminal positions have no legal actions
            assert!(
                !actions.is_empty(),
                "BUG: non-terminal position {:?} has no legal actions",
                state
            );
            let action = actions[rng.gen_range(0..actions.len())];
            state.apply(action);
        }

        state
            .winner()
            .expect("BUG: terminal position reported no winner")
    }
}
