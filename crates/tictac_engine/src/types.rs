//! Core domain types for tic-tac-toe.

use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of squares on the board.
pub const CELLS: usize = 9;

/// A player's symbol.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Mark X (goes first).
    X,
    /// Mark O (goes second).
    O,
}

impl Mark {
    /// Returns the opponent's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }

    fn from_char(c: char) -> Result<Self, BoardError> {
        match c {
            'x' | 'X' => Ok(Cell::Occupied(Mark::X)),
            'o' | 'O' => Ok(Cell::Occupied(Mark::O)),
            '.' | '_' | '-' | ' ' => Ok(Cell::Empty),
            other => Err(BoardError::InvalidCell(other)),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Boards are small `Copy` values. Every hypothetical placement works on
/// its own copy, so callers never see the engine touch their board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Creates a board from its nine cells.
    pub fn from_cells(cells: [Cell; CELLS]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if a square is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Indices of the empty squares in ascending order.
    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    /// True when no square is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| *cell != Cell::Empty)
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Occupied(mark))
            .count()
    }

    /// The mark due to play next, assuming X opened the game.
    pub fn to_move(&self) -> Mark {
        if self.count(Mark::X) > self.count(Mark::O) {
            Mark::O
        } else {
            Mark::X
        }
    }

    /// Places `mark` at `index` in place.
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), BoardError> {
        match self.cells.get(index) {
            None => Err(BoardError::OutOfBounds(index)),
            Some(Cell::Occupied(_)) => Err(BoardError::Occupied(index)),
            Some(Cell::Empty) => {
                self.cells[index] = Cell::Occupied(mark);
                Ok(())
            }
        }
    }

    /// Returns a copy of this board with `mark` placed at `index`.
    pub fn with(&self, index: usize, mark: Mark) -> Result<Self, BoardError> {
        let mut next = *self;
        next.place(index, mark)?;
        Ok(next)
    }

    /// Copy with `mark` at `index`; `index` must come from `available_moves`.
    pub(crate) fn branch(&self, index: usize, mark: Mark) -> Self {
        let mut next = *self;
        next.cells[index] = Cell::Occupied(mark);
        next
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&[Cell]> for Board {
    type Error = BoardError;

    fn try_from(cells: &[Cell]) -> Result<Self, Self::Error> {
        let cells: [Cell; CELLS] = cells
            .try_into()
            .map_err(|_| BoardError::WrongLength(cells.len()))?;
        Ok(Self { cells })
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses nine cell characters, e.g. `"xx_oo____"` or `"x|x|.\no|o|.\n.|.|."`.
    ///
    /// `|`, `/`, commas and line breaks separate rows or columns and are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !matches!(c, '|' | '/' | ',' | '\n' | '\r'))
            .map(Cell::from_char)
            .collect::<Result<Vec<_>, _>>()?;
        Board::try_from(cells.as_slice())
    }
}

impl std::fmt::Display for Board {
    /// Formats the board as a 3x3 grid; empty squares show their index.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => write!(f, "{}", index)?,
                    Cell::Occupied(mark) => write!(f, "{}", mark)?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.available_moves(), (0..9).collect::<Vec<_>>());
        assert!(!board.is_full());
    }

    #[test]
    fn test_available_moves_ascending() {
        let board: Board = "x.o.x.o..".parse().unwrap();
        assert_eq!(board.available_moves(), vec![1, 3, 5, 7, 8]);
    }

    #[test]
    fn test_place_rejects_occupied_and_out_of_bounds() {
        let mut board = Board::new();
        board.place(4, Mark::X).unwrap();
        assert_eq!(board.place(4, Mark::O), Err(BoardError::Occupied(4)));
        assert_eq!(board.place(9, Mark::O), Err(BoardError::OutOfBounds(9)));
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let board = Board::new();
        let next = board.with(0, Mark::X).unwrap();
        assert!(board.is_empty(0));
        assert_eq!(next.get(0), Some(Cell::Occupied(Mark::X)));
    }

    #[test]
    fn test_to_move() {
        let board = Board::new();
        assert_eq!(board.to_move(), Mark::X);
        let board = board.with(4, Mark::X).unwrap();
        assert_eq!(board.to_move(), Mark::O);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!("xo".parse::<Board>(), Err(BoardError::WrongLength(2)));
        assert_eq!(
            "xo_xo_xo_x".parse::<Board>(),
            Err(BoardError::WrongLength(10))
        );
    }

    #[test]
    fn test_parse_rejects_invalid_cell() {
        assert_eq!(
            "xo_xo_xoz".parse::<Board>(),
            Err(BoardError::InvalidCell('z'))
        );
    }

    #[test]
    fn test_parse_grid_with_separators() {
        let board: Board = "x|o|.\n.|x|.\n.|.|o".parse().unwrap();
        assert_eq!(board.get(0), Some(Cell::Occupied(Mark::X)));
        assert_eq!(board.get(1), Some(Cell::Occupied(Mark::O)));
        assert_eq!(board.get(8), Some(Cell::Occupied(Mark::O)));
        assert_eq!(board.count(Mark::X), 2);
    }

    #[test]
    fn test_try_from_slice() {
        let cells = [Cell::Empty; 4];
        assert_eq!(
            Board::try_from(&cells[..]),
            Err(BoardError::WrongLength(4))
        );
    }

    #[test]
    fn test_display() {
        let board: Board = "x...o....".parse().unwrap();
        assert_eq!(board.to_string(), "X|1|2\n-+-+-\n3|O|5\n-+-+-\n6|7|8");
    }

    #[test]
    fn test_mark_parse_case_insensitive() {
        assert_eq!("x".parse::<Mark>().unwrap(), Mark::X);
        assert_eq!("O".parse::<Mark>().unwrap(), Mark::O);
        assert_eq!(Mark::X.opponent(), Mark::O);
    }
}
