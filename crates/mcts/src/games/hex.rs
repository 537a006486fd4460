//! Hex-like connection game.
//!
//! The board is an N x N rhombus where every cell touches up to six
//! neighbours. Player One owns the top and bottom rows and wins by linking
//! them; Player Two owns the left and right columns. The board can never fill
//! up without one of the two connections being made, so there are no ties.

use std::fmt;
use uct_core::{GameState, Outcome, Player, Result, UctError};

/// Largest supported board side.
pub const MAX_SIZE: usize = 16;

/// Axial neighbour offsets as (row, column) deltas.
const DIRECTIONS: [(isize, isize); 6] = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, -1), (-1, 1)];

/// A board cell, used as the action type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Connection game position.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HexState {
    size: usize,
    /// Row-major cells.
    board: Vec<Option<Player>>,
    next_player: Player,
    plies: usize,
    winner: Option<Player>,
}

impl HexState {
    /// Create an empty board with `size` cells per side.
    pub fn new(size: usize, next_player: Player) -> Result<Self> {
        if size == 0 || size > MAX_SIZE {
            return Err(UctError::InvalidParameter(format!(
                "board size must be between 1 and {}, got {}",
                MAX_SIZE, size
            )));
        }
        Ok(Self {
            size,
            board: vec![None; size * size],
            next_player,
            plies: 0,
            winner: None,
        })
    }

    /// Build a position from rows of `1`, `2` and `.`/`0` for empty cells.
    pub fn from_rows(rows: &[&str], next_player: Player) -> Result<Self> {
        let mut state = Self::new(rows.len(), next_player)?;
        for (r, row) in rows.iter().enumerate() {
            let cells: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != state.size {
                return Err(UctError::InvalidBoard(format!(
                    "row {} must have {} cells, got {:?}",
                    r, state.size, row
                )));
            }
            for (c, ch) in cells.into_iter().enumerate() {
                let cell = match ch {
                    '1' => Some(Player::One),
                    '2' => Some(Player::Two),
                    '.' | '0' => None,
                    other => {
                        return Err(UctError::InvalidBoard(format!(
                            "unexpected cell {:?} at row {}, column {}",
                            other, r, c
                        )))
                    }
                };
                if cell.is_some() {
                    state.plies += 1;
                }
                state.board[r * state.size + c] = cell;
            }
        }
        state.winner = state.find_winner();
        Ok(state)
    }

    /// Number of cells per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stones on the board.
    pub fn plies(&self) -> usize {
        self.plies
    }

    /// Get the stone at a cell, if any.
    pub fn get(&self, row: usize, col: usize) -> Option<Player> {
        if row < self.size && col < self.size {
            self.board[row * self.size + col]
        } else {
            None
        }
    }

    fn find_winner(&self) -> Option<Player> {
        [Player::One, Player::Two]
            .into_iter()
            .find(|&player| self.connects(player))
    }

    /// Whether `player` has a chain of stones between its two edges.
    fn connects(&self, player: Player) -> bool {
        let n = self.size;

        // Fewer than `size` stones cannot span the board
        let stones = self.board.iter().filter(|c| **c == Some(player)).count();
        if stones < n {
            return false;
        }

        // Player One runs from row 0 to row n-1, Player Two from column 0 to column n-1
        let on_start = |r: usize, c: usize| match player {
            Player::One => r == 0,
            Player::Two => c == 0,
        };
        let on_goal = |r: usize, c: usize| match player {
            Player::One => r == n - 1,
            Player::Two => c == n - 1,
        };

        let mut visited = vec![false; n * n];
        let mut stack: Vec<(usize, usize)> = Vec::new();
        for (idx, cell) in self.board.iter().enumerate() {
            let (r, c) = (idx / n, idx % n);
            if *cell == Some(player) && on_start(r, c) {
                visited[idx] = true;
                stack.push((r, c));
            }
        }

        while let Some((r, c)) = stack.pop() {
            if on_goal(r, c) {
                return true;
            }
            for (dr, dc) in DIRECTIONS {
                let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc))
                else {
                    continue;
                };
                if nr >= n || nc >= n {
                    continue;
                }
                let idx = nr * n + nc;
                if !visited[idx] && self.board[idx] == Some(player) {
                    visited[idx] = true;
                    stack.push((nr, nc));
                }
            }
        }

        false
    }
}

impl GameState for HexState {
    type Action = Cell;

    /// Empty cells in row-major order.
    fn actions(&self) -> Vec<Cell> {
        if self.winner.is_some() {
            return Vec::new();
        }
        let n = self.size;
        self.board
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| Cell::new((i / n) as u8, (i % n) as u8))
            .collect()
    }

    fn apply(&mut self, action: Cell) {
        let idx = action.row as usize * self.size + action.col as usize;
        debug_assert!(self.board[idx].is_none(), "cell {} is occupied", action);
        self.board[idx] = Some(self.next_player);
        self.plies += 1;

        // Only the mover's chains changed
        if self.connects(self.next_player) {
            self.winner = Some(self.next_player);
        }
        self.next_player = self.next_player.opponent();
    }

    fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.plies == self.board.len()
    }

    fn winner(&self) -> Option<Outcome> {
        match self.winner {
            Some(player) => Some(Outcome::Winner(player)),
            // Not reached in play: a full board always holds a connection
            None => self.is_terminal().then_some(Outcome::Tie),
        }
    }

    fn next_player(&self) -> Player {
        self.next_player
    }

    fn canonical_key(&self) -> String {
        let mut key: String = self
            .board
            .iter()
            .map(|cell| match cell {
                Some(player) => char::from(b'0' + player.id()),
                None => '0',
            })
            .collect();
        key.push_str(&self.next_player.to_string());
        key
    }
}

impl fmt::Display for HexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            if r > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", " ".repeat(r))?;
            for c in 0..self.size {
                if c > 0 {
                    write!(f, " ")?;
                }
                match self.board[r * self.size + c] {
                    Some(player) => write!(f, "{}", player)?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}
