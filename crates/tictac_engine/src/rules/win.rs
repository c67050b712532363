//! Win detection logic for tic-tac-toe.

use super::draw::is_full;
use crate::error::EngineError;
use crate::types::{Board, Cell, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Geometry of a winning line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LineClass {
    /// One of the three rows.
    Row,
    /// One of the three columns.
    #[serde(rename = "col")]
    #[strum(serialize = "col")]
    Column,
    /// The `[0, 4, 8]` diagonal.
    DiagRight,
    /// The `[2, 4, 6]` diagonal.
    DiagLeft,
}

/// Three squares that win the game when they all hold the same mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine {
    /// Board indices of the line.
    pub cells: [usize; 3],
    /// Geometry of the line.
    pub class: LineClass,
}

impl WinningLine {
    const fn new(cells: [usize; 3], class: LineClass) -> Self {
        Self { cells, class }
    }

    /// The mark owning all three squares, if any.
    pub fn owner(&self, board: &Board) -> Option<Mark> {
        let [a, b, c] = self.cells;
        let mark = board.get(a)?.mark()?;
        let owned = |index| board.get(index) == Some(Cell::Occupied(mark));
        (owned(b) && owned(c)).then_some(mark)
    }
}

/// The eight winning lines: rows, then columns, then `[0, 4, 8]`, then `[2, 4, 6]`.
///
/// When more than one line is complete, the first in this order is reported.
pub const WINNING_LINES: [WinningLine; 8] = [
    WinningLine::new([0, 1, 2], LineClass::Row),
    WinningLine::new([3, 4, 5], LineClass::Row),
    WinningLine::new([6, 7, 8], LineClass::Row),
    WinningLine::new([0, 3, 6], LineClass::Column),
    WinningLine::new([1, 4, 7], LineClass::Column),
    WinningLine::new([2, 5, 8], LineClass::Column),
    WinningLine::new([0, 4, 8], LineClass::DiagRight),
    WinningLine::new([2, 4, 6], LineClass::DiagLeft),
];

/// Classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The game continues.
    NoOutcome,
    /// A mark completed a line.
    Win {
        /// The completed line.
        line: WinningLine,
        /// The mark owning the line.
        winner: Mark,
        /// Geometry of the line.
        class: LineClass,
    },
    /// Board full with no completed line.
    Tie,
}

impl Outcome {
    /// True for `Win` and `Tie`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::NoOutcome)
    }

    /// The winning mark, if any.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win { winner, .. } => Some(*winner),
            _ => None,
        }
    }
}

/// First complete line in [`WINNING_LINES`] order, with its owner.
pub(crate) fn first_win(board: &Board) -> Option<(WinningLine, Mark)> {
    WINNING_LINES
        .iter()
        .find_map(|line| line.owner(board).map(|mark| (*line, mark)))
}

pub(crate) fn evaluate(board: &Board) -> Outcome {
    match first_win(board) {
        Some((line, winner)) => Outcome::Win {
            line,
            winner,
            class: line.class,
        },
        None if is_full(board) => Outcome::Tie,
        None => Outcome::NoOutcome,
    }
}

/// Classifies the board as won, tied or still in play.
#[instrument(level = "trace")]
pub fn detect_outcome(board: &Board) -> Outcome {
    evaluate(board)
}

/// Checks if there is a winner on the board.
pub fn check_winner(board: &Board) -> Option<Mark> {
    first_win(board).map(|(_, mark)| mark)
}

/// Rejects boards on which both marks own a complete line.
///
/// Legal play stops at the first completed line, so this never holds for a
/// real game. One mark owning two lines at once is legal.
#[instrument(level = "trace")]
pub fn check_consistent(board: &Board) -> Result<(), EngineError> {
    let mut owners = WINNING_LINES.iter().filter_map(|line| line.owner(board));
    match owners.next() {
        Some(first) if owners.any(|mark| mark != first) => Err(EngineError::ConflictingWinners),
        _ => Ok(()),
    }
}
