//! Game rules for tic-tac-toe.
//!
//! Pure functions classifying a board snapshot. Rules are separated from
//! board storage so the search can call them on hypothetical boards.

pub mod draw;
pub mod win;

pub use draw::{is_full, is_tie};
pub use win::{
    check_consistent, check_winner, detect_outcome, LineClass, Outcome, WinningLine,
    WINNING_LINES,
};
