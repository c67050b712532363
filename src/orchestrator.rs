//! Game orchestration between players.

use crate::game::Game;
use crate::players::{HumanPlayer, Player};
use crate::scoreboard::Scoreboard;
use anyhow::Result;
use tictac_engine::{Mark, Outcome, Position};
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from orchestrator to the display.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A new round began.
    RoundStarted {
        /// 1-based round number.
        round: u32,
    },
    /// A human is expected to type a move.
    AwaitingInput {
        /// Player name.
        player: String,
        /// Mark the player places.
        mark: Mark,
    },
    /// Computer is thinking.
    Thinking {
        /// Player name.
        player: String,
    },
    /// Move was made.
    MoveMade {
        /// Player name.
        player: String,
        /// Mark placed.
        mark: Mark,
        /// Square played.
        position: Position,
    },
    /// Board rendering after a move.
    StateChanged(String),
    /// Round ended.
    GameOver {
        /// Final outcome, including the winning line.
        outcome: Outcome,
        /// Name of the winning player, `None` on a tie.
        winner: Option<String>,
    },
    /// Tally after a round or a hard reset.
    ScoreUpdated(Scoreboard),
    /// Waiting to hear whether to replay, reset the score or quit.
    AwaitingChoice,
}

/// What to do once a round has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum NextRound {
    /// Play again and keep the score.
    #[strum(to_string = "replay", serialize = "r")]
    Replay,
    /// Play again with the score cleared.
    #[strum(to_string = "reset", serialize = "h")]
    HardReset,
    /// Stop playing.
    #[strum(to_string = "quit", serialize = "q")]
    Quit,
}

/// Orchestrates gameplay between two players.
///
/// Moves are requested strictly one at a time, so a human move can never
/// land while the computer's move is still pending.
pub struct Orchestrator {
    game: Game,
    scoreboard: Scoreboard,
    player_x: Box<dyn Player>,
    player_o: Box<dyn Player>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        player_x: Box<dyn Player>,
        player_o: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            game: Game::new(),
            scoreboard: Scoreboard::new(),
            player_x,
            player_o,
            event_tx,
        }
    }

    /// Current game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Tally so far.
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Plays `rounds` rounds and returns the final tally.
    #[instrument(skip(self))]
    pub async fn run(&mut self, rounds: u32) -> Result<Scoreboard> {
        for round in 1..=rounds {
            self.restart();
            self.event_tx.send(GameEvent::RoundStarted { round })?;
            self.play_round().await?;
        }
        Ok(self.scoreboard)
    }

    /// Plays rounds until `menu` asks to quit or its input ends.
    ///
    /// After each round a line from `menu` picks a replay that keeps the
    /// score, a hard reset that clears it, or quitting.
    #[instrument(skip(self, menu))]
    pub async fn run_session<R: AsyncRead + Unpin + Send>(
        &mut self,
        menu: &HumanPlayer<R>,
    ) -> Result<Scoreboard> {
        let mut round = 0;
        loop {
            round += 1;
            self.restart();
            self.event_tx.send(GameEvent::RoundStarted { round })?;
            self.play_round().await?;

            match self.next_round(menu).await? {
                NextRound::Replay => {}
                NextRound::HardReset => {
                    self.hard_reset();
                    self.event_tx.send(GameEvent::ScoreUpdated(self.scoreboard))?;
                }
                NextRound::Quit => return Ok(self.scoreboard),
            }
        }
    }

    async fn next_round<R: AsyncRead + Unpin + Send>(
        &self,
        menu: &HumanPlayer<R>,
    ) -> Result<NextRound> {
        loop {
            self.event_tx.send(GameEvent::AwaitingChoice)?;
            let Some(line) = menu.read_line().await? else {
                return Ok(NextRound::Quit);
            };
            match line.trim().parse::<NextRound>() {
                Ok(choice) => {
                    debug!(%choice, "Round choice");
                    return Ok(choice);
                }
                Err(_) => warn!(input = %line.trim(), "Unrecognized round choice"),
            }
        }
    }

    /// Plays the current game to its end and records the result.
    pub async fn play_round(&mut self) -> Result<Outcome> {
        info!("Starting game orchestration");
        self.event_tx
            .send(GameEvent::StateChanged(self.game.board().to_string()))?;

        while !self.game.is_over() {
            let mark = self.game.to_move();
            let player = match mark {
                Mark::X => &mut self.player_x,
                Mark::O => &mut self.player_o,
            };
            let player_name = player.name().to_string();

            if player.is_human() {
                self.event_tx.send(GameEvent::AwaitingInput {
                    player: player_name.clone(),
                    mark,
                })?;
            } else {
                self.event_tx.send(GameEvent::Thinking {
                    player: player_name.clone(),
                })?;
            }

            debug!(player = %player_name, %mark, "Waiting for move");
            let index = player.get_move(&self.game).await?;
            self.game.make_move(index)?;

            let position = Position::from_index(index)
                .ok_or_else(|| anyhow::anyhow!("Square {} out of range", index))?;
            self.event_tx.send(GameEvent::MoveMade {
                player: player_name,
                mark,
                position,
            })?;
            self.event_tx
                .send(GameEvent::StateChanged(self.game.board().to_string()))?;
        }

        let outcome = *self.game.outcome();
        self.scoreboard.record(&outcome);
        let winner = outcome.winner().map(|mark| match mark {
            Mark::X => self.player_x.name().to_string(),
            Mark::O => self.player_o.name().to_string(),
        });
        info!(?outcome, ?winner, moves = ?self.game.history(), "Game over");

        self.event_tx.send(GameEvent::GameOver { outcome, winner })?;
        self.event_tx.send(GameEvent::ScoreUpdated(self.scoreboard))?;
        Ok(outcome)
    }

    /// Clears the board and keeps the score.
    pub fn restart(&mut self) {
        self.game.reset();
    }

    /// Clears the board and the score.
    pub fn hard_reset(&mut self) {
        self.game.reset();
        self.scoreboard.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::ComputerPlayer;

    /// X takes the top row while O plays the middle row.
    const X_WINS: &str = "0\n3\n1\n4\n2\n";
    use tictac_engine::Difficulty;

    #[tokio::test]
    async fn test_hard_against_hard_ties_every_round() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut orchestrator = Orchestrator::new(
            Box::new(ComputerPlayer::seeded("CPU X", Mark::X, Difficulty::Hard, 1)),
            Box::new(ComputerPlayer::seeded("CPU O", Mark::O, Difficulty::Hard, 2)),
            tx,
        );

        let score = orchestrator.run(2).await.unwrap();
        assert_eq!(*score.tie(), 2);
        assert_eq!(score.rounds(), 2);

        let mut game_overs = 0;
        while let Ok(event) = rx.try_recv() {
            if let GameEvent::GameOver { outcome, winner } = event {
                assert_eq!(outcome, Outcome::Tie);
                assert_eq!(winner, None);
                game_overs += 1;
            }
        }
        assert_eq!(game_overs, 2);
    }

    #[tokio::test]
    async fn test_hard_reset_clears_score() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut orchestrator = Orchestrator::new(
            Box::new(ComputerPlayer::seeded("A", Mark::X, Difficulty::Easy, 3)),
            Box::new(ComputerPlayer::seeded("B", Mark::O, Difficulty::Hard, 4)),
            tx,
        );
        orchestrator.run(1).await.unwrap();
        assert_eq!(orchestrator.scoreboard().rounds(), 1);

        orchestrator.hard_reset();
        assert_eq!(orchestrator.scoreboard().rounds(), 0);
        assert!(!orchestrator.game().is_over());
    }

    #[tokio::test]
    async fn test_session_replays_and_hard_resets() {
        // Replay, an unrecognized answer, hard reset, then quit.
        let input: &[u8] = b"0\n3\n1\n4\n2\nr\n0\n3\n1\n4\n2\nlater\nh\n0\n3\n1\n4\n2\nq\n";
        let x = HumanPlayer::new("Xena", input);
        let o = x.sharing_input("Otto");
        let menu = x.sharing_input("Menu");

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut orchestrator = Orchestrator::new(Box::new(x), Box::new(o), tx);
        let score = orchestrator.run_session(&menu).await.unwrap();

        // Two wins were counted before the reset, one after.
        assert_eq!(*score.x(), 1);
        assert_eq!(score.rounds(), 1);

        let mut rounds = 0;
        let mut choices = 0;
        let mut peak = 0;
        let mut cleared = false;
        while let Ok(event) = rx.try_recv() {
            match event {
                GameEvent::RoundStarted { .. } => rounds += 1,
                GameEvent::AwaitingChoice => choices += 1,
                GameEvent::ScoreUpdated(score) => {
                    peak = peak.max(score.rounds());
                    cleared |= peak == 2 && score.rounds() == 0;
                }
                _ => {}
            }
        }
        assert_eq!(rounds, 3);
        // The unrecognized "later" asks again.
        assert_eq!(choices, 4);
        assert_eq!(peak, 2);
        assert!(cleared);
    }

    #[tokio::test]
    async fn test_session_ends_with_input() {
        let x = HumanPlayer::new("Xena", X_WINS.as_bytes());
        let o = x.sharing_input("Otto");
        let menu = x.sharing_input("Menu");

        let (tx, _rx) = mpsc::unbounded_channel();
        let mut orchestrator = Orchestrator::new(Box::new(x), Box::new(o), tx);
        let score = orchestrator.run_session(&menu).await.unwrap();
        assert_eq!(*score.x(), 1);
        assert_eq!(orchestrator.game().history(), &[0, 3, 1, 4, 2]);
    }

    #[test]
    fn test_next_round_parsing() {
        assert_eq!("r".parse::<NextRound>().unwrap(), NextRound::Replay);
        assert_eq!("Replay".parse::<NextRound>().unwrap(), NextRound::Replay);
        assert_eq!("H".parse::<NextRound>().unwrap(), NextRound::HardReset);
        assert_eq!("reset".parse::<NextRound>().unwrap(), NextRound::HardReset);
        assert_eq!("q".parse::<NextRound>().unwrap(), NextRound::Quit);
        assert!("later".parse::<NextRound>().is_err());
    }
}
