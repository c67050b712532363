//! Exhaustive minimax over the full game tree.
//!
//! The tree below any position has at most 9! leaves, so the search runs
//! without pruning or memoization.

use crate::rules::win::evaluate;
use crate::rules::Outcome;
use crate::types::{Board, Mark};

/// Value of a searched position, from the maximizer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResult {
    /// The position is already decided; there is no move to make.
    Terminal {
        /// `+1` maximizer won, `-1` minimizer won, `0` tie.
        score: i8,
    },
    /// Best move for the side to play and the score it secures.
    Move {
        /// Score reached under optimal play from both sides.
        score: i8,
        /// Board index of the move.
        index: usize,
    },
}

impl SearchResult {
    /// Score of the position.
    pub fn score(&self) -> i8 {
        match self {
            SearchResult::Terminal { score } | SearchResult::Move { score, .. } => *score,
        }
    }

    /// Chosen move, absent for terminal positions.
    pub fn index(&self) -> Option<usize> {
        match self {
            SearchResult::Terminal { .. } => None,
            SearchResult::Move { index, .. } => Some(*index),
        }
    }
}

/// Minimax value of `board` with `maximizer` as the scoring side.
///
/// `maximizing` says whether `maximizer` or its opponent places the next
/// mark. Candidates are tried in ascending index order and the first
/// strictly better one is kept, so ties go to the lowest index.
pub fn search(board: &Board, maximizer: Mark, maximizing: bool) -> SearchResult {
    match evaluate(board) {
        Outcome::Win { winner, .. } if winner == maximizer => {
            return SearchResult::Terminal { score: 1 };
        }
        Outcome::Win { .. } => return SearchResult::Terminal { score: -1 },
        Outcome::Tie => return SearchResult::Terminal { score: 0 },
        Outcome::NoOutcome => {}
    }

    let mover = if maximizing {
        maximizer
    } else {
        maximizer.opponent()
    };

    let mut best: Option<(usize, i8)> = None;
    for index in board.available_moves() {
        let child = board.branch(index, mover);
        let score = search(&child, maximizer, !maximizing).score();
        let better = match best {
            None => true,
            Some((_, best_score)) if maximizing => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if better {
            best = Some((index, score));
        }
    }

    match best {
        Some((index, score)) => SearchResult::Move { score, index },
        // A non-terminal board always has an empty square.
        None => SearchResult::Terminal { score: 0 },
    }
}

/// Optimal move for `mark` to play, or `None` if the game is over.
pub fn best_move(board: &Board, mark: Mark) -> Option<usize> {
    search(board, mark, true).index()
}
