//! UCT Core - Game abstractions and common types
//!
//! This crate provides the [`GameState`] trait that every game searched by
//! `uct-mcts` implements, together with the small value types shared between
//! the games, the search engine and the arena.
//!
//! # Types
//!
//! - [`GameState`] - Trait for game positions
//! - [`Player`] - One of the two players (ids 1 and 2)
//! - [`Outcome`] - Result of a finished game (a winner or a tie)

mod error;
mod game;
mod types;

pub use error::{Result, UctError};
pub use game::GameState;
pub use types::{Outcome, Player};
