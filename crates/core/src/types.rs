//! Player and game result types.
//!
//! Players are numbered 1 and 2 throughout, which is also how they appear in
//! canonical keys and log output.

use std::fmt;

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Numeric id of the player (1 or 2).
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Look up a player by numeric id.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// Get the opposing player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Winner(Player),
    Tie,
}

impl Outcome {
    /// Whether a node whose position has `to_move` as the next player earns a win.
    ///
    /// A node is the position reached by the opponent of `to_move`, so it is
    /// credited unless `to_move` won. A tie credits every node.
    pub fn credits(self, to_move: Player) -> bool {
        self != Outcome::Winner(to_move)
    }

    /// The winning player, if the game was not tied.
    pub fn player(self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(player),
            Outcome::Tie => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "player {}", player),
            Outcome::Tie => write!(f, "tie"),
        }
    }
}
