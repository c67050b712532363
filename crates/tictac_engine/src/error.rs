//! Error types for board construction and move selection.

/// Error raised when a board is malformed or a placement is illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// A board description did not contain exactly nine cells.
    #[display("Board must have exactly 9 cells, got {}", _0)]
    WrongLength(usize),

    /// A board description contained a character that is not a cell value.
    #[display("Invalid cell value {:?}", _0)]
    InvalidCell(char),

    /// A square index outside 0-8.
    #[display("Position {} out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The square already holds a mark.
    #[display("Square {} is already occupied", _0)]
    Occupied(usize),
}

impl std::error::Error for BoardError {}

/// Error raised by the decision engine when its preconditions do not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum EngineError {
    /// The board has no empty square, so there is no move to choose.
    #[display("Invalid state: no legal moves remain on the board")]
    NoLegalMoves,

    /// A mark already completed a line, so the game has ended.
    #[display("Invalid state: the game has already been won")]
    AlreadyWon,

    /// Both marks own a completed line, which legal play cannot produce.
    #[display("Invalid state: both X and O have completed a line")]
    ConflictingWinners,

    /// The board itself was rejected.
    #[display("{}", _0)]
    #[from]
    Board(BoardError),
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Board(e) => Some(e),
            _ => None,
        }
    }
}
