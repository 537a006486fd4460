//! Game implementations searched by the engine.
//!
//! - [`SubtractionState`] - single pile, take 1..=K counters, last taker wins
//! - [`TicTacToeState`] - 3x3 noughts and crosses
//! - [`HexState`] - N x N connection game on a rhombus

pub mod hex;
pub mod subtraction;
pub mod tictactoe;

pub use hex::{Cell, HexState};
pub use subtraction::SubtractionState;
pub use tictactoe::{TicTacToeAction, TicTacToeState};
