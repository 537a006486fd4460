//! Tic-tac-toe.
//!
//! Player One plays `X`, Player Two plays `O`. Either may start. A line
//! counts only when all three of its cells hold the same mark.

use std::fmt;
use uct_core::{GameState, Outcome, Player, Result, UctError};

/// The 8 winning lines of the board.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // center column
    [2, 5, 8], // right column
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

fn mark(cell: Option<Player>) -> char {
    match cell {
        Some(Player::One) => 'X',
        Some(Player::Two) => 'O',
        None => ' ',
    }
}

/// Tic-tac-toe board state.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TicTacToeState {
    /// Board: 9 cells, indexed 0-8 (row-major).
    /// ```text
    /// 0 | 1 | 2
    /// ---------
    /// 3 | 4 | 5
    /// ---------
    /// 6 | 7 | 8
    /// ```
    board: [Option<Player>; 9],

    /// Player to move.
    next_player: Player,

    /// Cached winning line owner (if any).
    line_owner: Option<Player>,
}

impl TicTacToeState {
    /// Create a new empty board.
    pub fn new(next_player: Player) -> Self {
        Self {
            board: [None; 9],
            next_player,
            line_owner: None,
        }
    }

    /// Build a position from three rows of `X`, `O` and blanks (` `, `.` or `-`).
    pub fn from_rows(rows: [&str; 3], next_player: Player) -> Result<Self> {
        let mut board = [None; 9];
        for (r, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().collect();
            if cells.len() != 3 {
                return Err(UctError::InvalidBoard(format!(
                    "row {} must have 3 cells, got {:?}",
                    r, row
                )));
            }
            for (c, ch) in cells.into_iter().enumerate() {
                board[r * 3 + c] = match ch {
                    'X' | 'x' => Some(Player::One),
                    'O' | 'o' => Some(Player::Two),
                    ' ' | '.' | '-' => None,
                    other => {
                        return Err(UctError::InvalidBoard(format!(
                            "unexpected mark {:?} at row {}, column {}",
                            other, r, c
                        )))
                    }
                };
            }
        }

        let mut state = Self {
            board,
            next_player,
            line_owner: None,
        };
        state.line_owner = state.check_line();
        Ok(state)
    }

    /// Get the piece at a cell, if any.
    pub fn get(&self, cell: usize) -> Option<Player> {
        self.board.get(cell).copied().flatten()
    }

    /// Find a line of three identical, non-empty marks.
    fn check_line(&self) -> Option<Player> {
        LINES.iter().find_map(|line| {
            let owner = self.board[line[0]]?;
            (self.board[line[1]] == Some(owner) && self.board[line[2]] == Some(owner))
                .then_some(owner)
        })
    }

    /// Check if the board is full.
    fn is_full(&self) -> bool {
        self.board.iter().all(|c| c.is_some())
    }
}

impl GameState for TicTacToeState {
    type Action = TicTacToeAction;

    /// Empty cells in ascending index order.
    fn actions(&self) -> Vec<TicTacToeAction> {
        if self.line_owner.is_some() {
            return Vec::new();
        }
        self.board
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| TicTacToeAction(i as u8))
            .collect()
    }

    fn apply(&mut self, action: TicTacToeAction) {
        let cell = action.0 as usize;
        debug_assert!(self.board[cell].is_none(), "cell {} is occupied", cell);
        self.board[cell] = Some(self.next_player);
        self.next_player = self.next_player.opponent();
        self.line_owner = self.check_line();
    }

    fn is_terminal(&self) -> bool {
        self.line_owner.is_some() || self.is_full()
    }

    fn winner(&self) -> Option<Outcome> {
        match self.line_owner {
            Some(player) => Some(Outcome::Winner(player)),
            None if self.is_full() => Some(Outcome::Tie),
            None => None,
        }
    }

    fn next_player(&self) -> Player {
        self.next_player
    }

    fn canonical_key(&self) -> String {
        let mut key: String = self.board.iter().map(|c| mark(*c)).collect();
        key.push_str(&self.next_player.to_string());
        key
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            writeln!(f, "-------")?;
            write!(f, "|")?;
            for col in 0..3 {
                write!(f, "{}|", mark(self.board[row * 3 + col]))?;
            }
            writeln!(f)?;
        }
        write!(f, "-------")
    }
}

/// Tic-tac-toe action (cell index 0-8).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToeAction(pub u8);

impl TicTacToeAction {
    /// Get the row (0-2).
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    pub fn col(self) -> u8 {
        self.0 % 3
    }
}

impl fmt::Display for TicTacToeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}
