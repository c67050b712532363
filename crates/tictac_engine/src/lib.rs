//! Pure tic-tac-toe logic: board model, outcome detection and a minimax
//! computer opponent with tunable difficulty.
//!
//! Every operation is a synchronous function of its inputs. Boards are
//! passed by reference and copied for hypothetical placements, and
//! randomness comes from a caller-supplied [`rand::Rng`].
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use tictac_engine::{choose_move, detect_outcome, Board, Difficulty, Mark, Outcome};
//!
//! let board: Board = "xx.oo....".parse().unwrap();
//! assert_eq!(detect_outcome(&board), Outcome::NoOutcome);
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! assert_eq!(choose_move(&board, Mark::X, Difficulty::Hard, &mut rng).unwrap(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod position;
mod rules;
mod types;

pub use engine::{best_move, choose_move, search, Difficulty, Engine, SearchResult, Strategy};
pub use error::{BoardError, EngineError};
pub use position::Position;
pub use rules::{
    check_consistent, check_winner, detect_outcome, is_full, is_tie, LineClass, Outcome,
    WinningLine, WINNING_LINES,
};
pub use types::{Board, Cell, Mark, CELLS};
