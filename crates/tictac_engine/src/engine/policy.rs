//! Difficulty policy: blend optimal play with uniformly random moves.

use super::search::best_move;
use crate::error::EngineError;
use crate::rules::{check_consistent, check_winner};
use crate::types::{Board, Mark};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// How often the computer plays the optimal move.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Optimal about one move in five.
    Easy,
    /// Optimal about three moves in ten.
    Medium,
    /// Always optimal; never loses.
    #[default]
    Hard,
}

/// Which kind of move a single decision uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Strategy {
    /// Minimax best move.
    Optimal,
    /// Uniformly random legal move.
    Random,
}

impl Difficulty {
    /// Nominal probability that a decision is optimal.
    pub fn optimal_rate(self) -> f64 {
        match self {
            Difficulty::Easy => 0.2,
            Difficulty::Medium => 0.3,
            Difficulty::Hard => 1.0,
        }
    }

    /// Draws the strategy for one decision.
    ///
    /// `Easy` and `Medium` consume exactly one `f64` from `rng`; `Hard`
    /// consumes nothing.
    pub fn pick_strategy<R: Rng>(self, rng: &mut R) -> Strategy {
        match self {
            Difficulty::Hard => Strategy::Optimal,
            Difficulty::Easy | Difficulty::Medium => self.strategy_for(rng.random::<f64>()),
        }
    }

    /// Strategy selected by a uniform draw in `[0, 1)`.
    ///
    /// `Medium` plays randomly when `draw < 0.7`, `Easy` when `draw > 0.2`.
    /// Both comparisons are strict.
    pub fn strategy_for(self, draw: f64) -> Strategy {
        let random = match self {
            Difficulty::Easy => draw > 0.2,
            Difficulty::Medium => draw < 0.7,
            Difficulty::Hard => false,
        };
        if random {
            Strategy::Random
        } else {
            Strategy::Optimal
        }
    }
}

/// Picks the square `mark` plays on `board` at the given difficulty.
///
/// Fails with [`EngineError::NoLegalMoves`] on a full board, with
/// [`EngineError::AlreadyWon`] once a line is complete and with
/// [`EngineError::ConflictingWinners`] on a board no game can reach.
#[instrument(level = "debug", skip(board, rng), fields(board = %board))]
pub fn choose_move<R: Rng>(
    board: &Board,
    mark: Mark,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<usize, EngineError> {
    check_consistent(board)?;
    let moves = board.available_moves();
    if moves.is_empty() {
        return Err(EngineError::NoLegalMoves);
    }
    if check_winner(board).is_some() {
        return Err(EngineError::AlreadyWon);
    }

    let strategy = difficulty.pick_strategy(rng);
    let index = match strategy {
        Strategy::Random => moves[rng.random_range(0..moves.len())],
        Strategy::Optimal => best_move(board, mark).ok_or(EngineError::AlreadyWon)?,
    };

    debug!(%strategy, index, "Chose move");
    Ok(index)
}

/// A computer opponent: one mark, one difficulty, its own random source.
#[derive(Debug, Clone)]
pub struct Engine {
    mark: Mark,
    difficulty: Difficulty,
    rng: StdRng,
}

impl Engine {
    /// Creates an engine seeded from the operating system.
    pub fn new(mark: Mark, difficulty: Difficulty) -> Self {
        Self {
            mark,
            difficulty,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates an engine whose random choices repeat for the same seed.
    pub fn seeded(mark: Mark, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            mark,
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The mark this engine plays.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// The difficulty this engine plays at.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Chooses this engine's next move.
    pub fn choose_move(&mut self, board: &Board) -> Result<usize, EngineError> {
        choose_move(board, self.mark, self.difficulty, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_never_draws_from_rng() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut untouched = rng.clone();
        assert_eq!(Difficulty::Hard.pick_strategy(&mut rng), Strategy::Optimal);
        assert_eq!(rng.random::<u64>(), untouched.random::<u64>());
    }

    #[test]
    fn test_full_board_has_no_legal_moves() {
        let board: Board = "xoxoxxoxo".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            choose_move(&board, Mark::O, Difficulty::Hard, &mut rng),
            Err(EngineError::NoLegalMoves)
        );
    }

    /// Rng returning the same word forever.
    struct ConstantRng(u64);

    impl rand::RngCore for ConstantRng {
        fn next_u32(&mut self) -> u32 {
            self.0 as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for (byte, source) in dst.iter_mut().zip(self.0.to_le_bytes().iter().cycle()) {
                *byte = *source;
            }
        }
    }

    #[test]
    fn test_easy_cut_point_is_strict() {
        assert_eq!(Difficulty::Easy.strategy_for(0.2), Strategy::Optimal);
        assert_eq!(Difficulty::Easy.strategy_for(0.2 + f64::EPSILON), Strategy::Random);
        assert_eq!(Difficulty::Easy.strategy_for(0.0), Strategy::Optimal);
        assert_eq!(Difficulty::Easy.strategy_for(0.999), Strategy::Random);
    }

    #[test]
    fn test_medium_cut_point_is_strict() {
        assert_eq!(Difficulty::Medium.strategy_for(0.7), Strategy::Optimal);
        assert_eq!(Difficulty::Medium.strategy_for(0.7 - f64::EPSILON), Strategy::Random);
        assert_eq!(Difficulty::Medium.strategy_for(0.0), Strategy::Random);
        assert_eq!(Difficulty::Medium.strategy_for(0.999), Strategy::Optimal);
    }

    #[test]
    fn test_hard_ignores_draw() {
        for draw in [0.0, 0.2, 0.7, 0.999] {
            assert_eq!(Difficulty::Hard.strategy_for(draw), Strategy::Optimal);
        }
    }

    #[test]
    fn test_pick_strategy_uses_injected_draw() {
        // All-zero bits draw 0.0, all-one bits draw just under 1.0.
        let mut low = ConstantRng(0);
        let mut high = ConstantRng(u64::MAX);
        assert_eq!(Difficulty::Easy.pick_strategy(&mut low), Strategy::Optimal);
        assert_eq!(Difficulty::Easy.pick_strategy(&mut high), Strategy::Random);
        assert_eq!(Difficulty::Medium.pick_strategy(&mut low), Strategy::Random);
        assert_eq!(Difficulty::Medium.pick_strategy(&mut high), Strategy::Optimal);
        assert_eq!(Difficulty::Hard.pick_strategy(&mut low), Strategy::Optimal);
    }

    #[test]
    fn test_won_board_has_no_move() {
        let board: Board = "xxxoo....".parse().unwrap();
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut rng = StdRng::seed_from_u64(3);
            assert_eq!(
                choose_move(&board, Mark::O, difficulty, &mut rng),
                Err(EngineError::AlreadyWon)
            );
        }
    }

    #[test]
    fn test_random_moves_are_legal() {
        let board: Board = "x.o.x.o..".parse().unwrap();
        let legal = board.available_moves();
        let mut engine = Engine::seeded(Mark::X, Difficulty::Easy, 42);
        for _ in 0..200 {
            let index = engine.choose_move(&board).unwrap();
            assert!(legal.contains(&index), "illegal move {}", index);
        }
    }

    #[test]
    fn test_difficulty_parse_and_display() {
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert_eq!(Difficulty::default(), Difficulty::Hard);
    }
}
