//! Game session: the authoritative board and turn order.

use tictac_engine::{detect_outcome, Board, BoardError, Mark, Outcome};
use tracing::{debug, instrument};

/// Error that can occur when applying a move to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum MoveError {
    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The board rejected the placement.
    #[display("{}", _0)]
    #[from]
    Board(BoardError),
}

impl std::error::Error for MoveError {}

/// Tic-tac-toe game session.
///
/// Holds the one board that real moves are applied to. X always opens.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Mark,
    outcome: Outcome,
    history: Vec<usize>,
}

impl Game {
    /// Creates a new game with an empty board and X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Mark::X,
            outcome: Outcome::NoOutcome,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark whose turn it is.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the outcome after the last move.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns the squares played so far, in order.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// True once the game is won or tied.
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Places the current player's mark at `index` (0-8).
    ///
    /// Returns the outcome of the resulting board. The turn passes to the
    /// opponent only if the game continues.
    #[instrument(skip(self), fields(mark = %self.to_move))]
    pub fn make_move(&mut self, index: usize) -> Result<Outcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        self.board.place(index, self.to_move)?;
        self.history.push(index);
        self.outcome = detect_outcome(&self.board);
        debug!(outcome = ?self.outcome, "Move applied");

        if !self.is_over() {
            self.to_move = self.to_move.opponent();
        }
        Ok(self.outcome)
    }

    /// Clears the board for a new round with X to move.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
