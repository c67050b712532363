//! Computer player backed by the minimax engine.

use super::Player;
use crate::game::Game;
use anyhow::Result;
use std::time::Duration;
use tictac_engine::{Difficulty, Engine, Mark};
use tracing::debug;

/// Computer opponent with a simulated thinking pause.
pub struct ComputerPlayer {
    name: String,
    engine: Engine,
    think_delay: Duration,
}

impl ComputerPlayer {
    /// Creates a computer player with an entropy-seeded engine.
    pub fn new(name: impl Into<String>, mark: Mark, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            engine: Engine::new(mark, difficulty),
            think_delay: Duration::ZERO,
        }
    }

    /// Creates a computer player whose random choices repeat for `seed`.
    pub fn seeded(
        name: impl Into<String>,
        mark: Mark,
        difficulty: Difficulty,
        seed: u64,
    ) -> Self {
        Self {
            name: name.into(),
            engine: Engine::seeded(mark, difficulty, seed),
            think_delay: Duration::ZERO,
        }
    }

    /// Sets the pause taken before each move.
    pub fn with_think_delay(mut self, think_delay: Duration) -> Self {
        self.think_delay = think_delay;
        self
    }
}

#[async_trait::async_trait]
impl Player for ComputerPlayer {
    async fn get_move(&mut self, game: &Game) -> Result<usize> {
        if !self.think_delay.is_zero() {
            tokio::time::sleep(self.think_delay).await;
        }

        let index = self.engine.choose_move(game.board())?;
        debug!(
            player = %self.name,
            mark = %self.engine.mark(),
            difficulty = %self.engine.difficulty(),
            position = index,
            "Computer chose position"
        );
        Ok(index)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
