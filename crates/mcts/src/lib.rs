//! Monte Carlo Tree Search over a transposition-merged node store.
//!
//! This crate provides a UCT search that works with any game implementing
//! the `uct_core::GameState` trait, plus three such games.
//!
//! # Features
//!
//! - **Transpositions**: positions are keyed by their canonical encoding, so
//!   every path to the same position shares one node
//! - **Persistent store**: a [`NodeStore`] outlives a single search and keeps
//!   its statistics across the moves of one game
//! - **Pluggable policies**: tree and score policies are resolved by name once
//!   and fail fast on unknown names
//! - **Evaluator Abstraction**: leaves are scored through the [`Evaluator`]
//!   trait; [`RolloutEvaluator`] plays random games
//!
//! # Example
//!
//! ```
//! use uct_mcts::{games::TicTacToeState, Mcts, MctsConfig, NodeStore, RolloutEvaluator};
//! use uct_core::Player;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let state = TicTacToeState::new(Player::One);
//! let mut store = NodeStore::new();
//!
//! let config = MctsConfig::from_names("uct", "zero-one").unwrap().iterations(200);
//! let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(42));
//! let mut mcts = Mcts::new(config, evaluator);
//!
//! let result = mcts.search(&mut store, &state);
//! println!("Best action: {:?}", result.best_action);
//! assert_eq!(result.root_traversals, 200);
//! ```

pub mod config;
pub mod evaluator;
pub mod games;
mod node;
pub mod policy;
pub mod search;
mod store;

pub use config::MctsConfig;
pub use evaluator::{Evaluator, RolloutEvaluator};
pub use node::{Node, NodeId};
pub use policy::{best, worst, ScorePolicy, TreePolicy};
pub use search::{ChildStats, Mcts, SearchResult};
pub use store::NodeStore;
