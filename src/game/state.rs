use super::board::MoveError as BoardMoveError;
use super::{Board, Columns, Player, COLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    ColumnFull,
    InvalidColumn,
    GameOver,
}

impl From<BoardMoveError> for MoveError {
    fn from(e: BoardMoveError) -> Self {
        match e {
            BoardMoveError::ColumnFull => MoveError::ColumnFull,
            BoardMoveError::InvalidColumn => MoveError::InvalidColumn,
        }
    }
}

/// The committed game: only real moves ever reach this board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create initial game state with `first` to move
    pub fn new(first: Player) -> Self {
        GameState {
            board: Board::new(first),
            current_player: first,
            outcome: None,
        }
    }

    /// Resume from an arbitrary position. The side to move is derived from
    /// the piece count and the board's first-turn flag.
    pub fn from_board(board: Board) -> Self {
        let current_player = if board.piece_count() % 2 == 0 {
            board.first_turn()
        } else {
            board.first_turn().other()
        };
        let outcome = if board.is_win(Player::Ai) {
            Some(GameOutcome::Winner(Player::Ai))
        } else if board.is_win(Player::Human) {
            Some(GameOutcome::Winner(Player::Human))
        } else if board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        };
        GameState {
            board,
            current_player,
            outcome,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Columns {
        if self.is_terminal() {
            return Columns::new();
        }
        self.board.open_columns()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = *self;
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply move mutably (for UI efficiency)
    pub fn apply_move_mut(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if column >= COLS {
            return Err(MoveError::InvalidColumn);
        }

        let row = self.board.drop_piece(column, self.current_player)?;

        if self.board.check_win(row, column) {
            self.outcome = Some(GameOutcome::Winner(self.current_player));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        }

        self.current_player = self.current_player.other();

        Ok(())
    }
}
