//! Subtraction game (single-pile Nim).
//!
//! Players alternately remove between 1 and K counters from a pile. Under the
//! normal play convention the player who takes the last counter wins, so the
//! positions where the pile is a multiple of K + 1 are lost for the mover.

use std::fmt;
use uct_core::{GameState, Outcome, Player, Result, UctError};

/// Returns true if the player to move loses against perfect play.
pub fn is_losing_position(pile: u32, max_take: u32) -> bool {
    pile % (max_take + 1) == 0
}

/// Subtraction game position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtractionState {
    remaining: u32,
    max_take: u32,
    next_player: Player,
}

impl SubtractionState {
    /// Create a pile of `pile` counters from which at most `max_take` may be taken per move.
    pub fn new(pile: u32, max_take: u32, next_player: Player) -> Result<Self> {
        if pile == 0 {
            return Err(UctError::InvalidParameter(
                "pile must hold at least one counter".to_string(),
            ));
        }
        if max_take == 0 {
            return Err(UctError::InvalidParameter(
                "players must be allowed to take at least one counter".to_string(),
            ));
        }
        Ok(Self {
            remaining: pile,
            max_take,
            next_player,
        })
    }

    /// Counters left on the pile.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Largest number of counters a single move may take.
    pub fn max_take(&self) -> u32 {
        self.max_take
    }
}

impl GameState for SubtractionState {
    /// Number of counters to take.
    type Action = u32;

    /// Largest take first.
    fn actions(&self) -> Vec<u32> {
        (1..=self.max_take.min(self.remaining)).rev().collect()
    }

    fn apply(&mut self, action: u32) {
        debug_assert!((1..=self.max_take.min(self.remaining)).contains(&action));
        self.remaining -= action;
        self.next_player = self.next_player.opponent();
    }

    fn is_terminal(&self) -> bool {
        self.remaining == 0
    }

    fn winner(&self) -> Option<Outcome> {
        // The player who emptied the pile is the one not to move
        self.is_terminal()
            .then(|| Outcome::Winner(self.next_player.opponent()))
    }

    fn next_player(&self) -> Player {
        self.next_player
    }

    fn canonical_key(&self) -> String {
        format!("{},{}", self.remaining, self.next_player)
    }
}

impl fmt::Display for SubtractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stones={}, NextPlayer={}", self.remaining, self.next_player)
    }
}
