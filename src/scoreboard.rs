//! Running tally of rounds.

use serde::{Deserialize, Serialize};
use tictac_engine::{Mark, Outcome};

/// Wins per mark and ties across rounds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct Scoreboard {
    /// Rounds won by X.
    x: u32,
    /// Rounds won by O.
    o: u32,
    /// Tied rounds.
    tie: u32,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a finished round. Undecided outcomes are ignored.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Win { winner: Mark::X, .. } => self.x += 1,
            Outcome::Win { winner: Mark::O, .. } => self.o += 1,
            Outcome::Tie => self.tie += 1,
            Outcome::NoOutcome => {}
        }
    }

    /// Rounds counted so far.
    pub fn rounds(&self) -> u32 {
        self.x + self.o + self.tie
    }

    /// Clears all counts.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X: {}  O: {}  Tie: {}", self.x, self.o, self.tie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictac_engine::{detect_outcome, Board};

    #[test]
    fn test_record_and_reset() {
        let mut score = Scoreboard::new();
        let x_wins: Board = "xxxoo....".parse().unwrap();
        let tie: Board = "xoxxoooxx".parse().unwrap();

        score.record(&detect_outcome(&x_wins));
        score.record(&detect_outcome(&tie));
        score.record(&Outcome::NoOutcome);

        assert_eq!(*score.x(), 1);
        assert_eq!(*score.o(), 0);
        assert_eq!(*score.tie(), 1);
        assert_eq!(score.rounds(), 2);
        assert_eq!(score.to_string(), "X: 1  O: 0  Tie: 1");

        score.reset();
        assert_eq!(score.rounds(), 0);
    }
}
