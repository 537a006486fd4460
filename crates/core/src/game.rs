use crate::types::{Outcome, Player};
use std::fmt::Debug;
use std::hash::Hash;

/// A position in a two-player, perfect-information, zero-sum game.
///
/// Implementations are mutable positions: `apply` advances the game in place
/// and `Clone` is the only way to branch. The search engine relies on the
/// following contract:
///
/// - `actions` enumerates legal actions in a deterministic order. The order is
///   observed by the selection policies as their tie-break order.
/// - `actions` is empty only when `is_terminal` is true.
/// - `apply` always hands the move to the opponent.
/// - Two positions with equal `canonical_key` are strategically identical.
pub trait GameState: Clone + Debug {
    /// A legal move in this game.
    type Action: Copy + Eq + Hash + Debug;

    /// Returns all legal actions from this position.
    fn actions(&self) -> Vec<Self::Action>;

    /// Plays `action` for the player to move.
    ///
    /// The action must be legal in this position; this is not checked.
    fn apply(&mut self, action: Self::Action);

    /// Returns true if no further moves can be played.
    fn is_terminal(&self) -> bool;

    /// Returns the result of a finished game, or `None` while it is still running.
    fn winner(&self) -> Option<Outcome>;

    /// The player whose turn it is.
    fn next_player(&self) -> Player;

    /// Deterministic encoding of the board contents and the player to move.
    fn canonical_key(&self) -> String;
}
