use std::fmt;

use arrayvec::ArrayVec;

use super::Player;
use crate::error::BoardParseError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CENTER_COL: usize = COLS / 2;

/// Open columns, left to right. Fixed capacity so the search never allocates.
pub type Columns = ArrayVec<usize, COLS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Ai,
    Human,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Ai => 'X',
            Cell::Human => 'O',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    ColumnFull,
    InvalidColumn,
}

/// A 6x7 grid plus the side that opened the game.
///
/// Row 0 is the top, row 5 is the bottom. Pieces only fall, so every column is
/// a contiguous run of occupied cells from the bottom up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
    first_turn: Player,
}

impl Board {
    /// Create a new empty board for a game opened by `first_turn`
    pub fn new(first_turn: Player) -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
            first_turn,
        }
    }

    /// Parse the text format used by `Display`: six lines of seven cells, top
    /// row first, `.` empty, `X` AI, `O` human. Blank lines are ignored.
    pub fn parse(first_turn: Player, text: &str) -> Result<Self, BoardParseError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() != ROWS {
            return Err(BoardParseError::RowCount(lines.len()));
        }

        let mut board = Board::new(first_turn);
        for (row, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if chars.len() != COLS {
                return Err(BoardParseError::RowLength {
                    row,
                    len: chars.len(),
                });
            }
            for (col, ch) in chars.into_iter().enumerate() {
                board.cells[row][col] = match ch.to_ascii_uppercase() {
                    '.' | '*' => Cell::Empty,
                    'X' => Cell::Ai,
                    'O' => Cell::Human,
                    other => return Err(BoardParseError::UnknownCell { row, col, ch: other }),
                };
            }
        }

        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                let below = board.cells[row + 1][col];
                if board.cells[row][col] != Cell::Empty && below == Cell::Empty {
                    return Err(BoardParseError::FloatingPiece { row, col });
                }
            }
        }

        Ok(board)
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Which side moved first in this game
    pub fn first_turn(&self) -> Player {
        self.first_turn
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// All columns whose top cell is empty, left to right
    pub fn open_columns(&self) -> Columns {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// The lowest empty row in `col`, or `None` if the column is full
    pub fn drop_row(&self, col: usize) -> Option<usize> {
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Set a cell without any legality check. Hot inner-loop primitive.
    pub fn place(&mut self, row: usize, col: usize, player: Player) {
        debug_assert_eq!(self.cells[row][col], Cell::Empty, "cell ({row}, {col}) is occupied");
        self.cells[row][col] = player.to_cell();
    }

    /// Revert a `place` at the same cell
    pub fn unplace(&mut self, row: usize, col: usize) {
        self.cells[row][col] = Cell::Empty;
    }

    /// Drop `player`'s piece in `col`, run `f` on the resulting board, and take
    /// the piece back before returning.
    ///
    /// `col` must be open; passing a full column is a caller bug.
    pub fn with_move<R>(
        &mut self,
        col: usize,
        player: Player,
        f: impl FnOnce(&mut Board) -> R,
    ) -> R {
        let row = match self.drop_row(col) {
            Some(row) => row,
            None => panic!("speculative move into full column {col}"),
        };
        self.place(row, col, player);
        let result = f(self);
        self.unplace(row, col);
        result
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn);
        }

        let row = self.drop_row(col).ok_or(MoveError::ColumnFull)?;
        self.place(row, col, player);
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// True iff `player` has four in a row anywhere on the board
    pub fn is_win(&self, player: Player) -> bool {
        let cell = player.to_cell();
        let four = |r: usize, c: usize, dr: isize, dc: isize| {
            (0..4).all(|i| {
                let row = (r as isize + dr * i) as usize;
                let col = (c as isize + dc * i) as usize;
                self.cells[row][col] == cell
            })
        };

        // Horizontal
        for row in 0..ROWS {
            for col in 0..COLS - 3 {
                if four(row, col, 0, 1) {
                    return true;
                }
            }
        }

        // Vertical
        for col in 0..COLS {
            for row in 0..ROWS - 3 {
                if four(row, col, 1, 0) {
                    return true;
                }
            }
        }

        // Diagonal (top-left to bottom-right, \)
        for row in 0..ROWS - 3 {
            for col in 0..COLS - 3 {
                if four(row, col, 1, 1) {
                    return true;
                }
            }
        }

        // Diagonal (bottom-left to top-right, /)
        for row in 3..ROWS {
            for col in 0..COLS - 3 {
                if four(row, col, -1, 1) {
                    return true;
                }
            }
        }

        false
    }

    /// Game over: either side has won or there is nowhere left to play
    pub fn is_terminal(&self) -> bool {
        self.is_win(Player::Ai) || self.is_win(Player::Human) || self.is_full()
    }

    /// Check if the last move at (row, col) resulted in a win
    pub fn check_win(&self, row: usize, col: usize) -> bool {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return false;
        }

        [(0, 1), (1, 0), (1, 1), (-1, 1)]
            .into_iter()
            .any(|(dr, dc)| self.run_length(row, col, dr, dc, cell) >= 4)
    }

    /// Length of the run of `cell` through (row, col) along direction (dr, dc)
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
        let mut count = 1;
        for sign in [1, -1] {
            let mut r = row as isize + dr * sign;
            let mut c = col as isize + dc * sign;
            while (0..ROWS as isize).contains(&r)
                && (0..COLS as isize).contains(&c)
                && self.cells[r as usize][c as usize] == cell
            {
                count += 1;
                r += dr * sign;
                c += dc * sign;
            }
        }
        count
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
