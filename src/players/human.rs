//! Human player reading squares from a line-based input.

use super::Player;
use crate::game::Game;
use anyhow::Result;
use std::sync::Arc;
use tictac_engine::Position;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Human player typing a square number (0-8) or name (`center`).
///
/// Players sharing a terminal must share one reader, since a buffered
/// reader may pull in lines meant for the other player.
pub struct HumanPlayer<R = Stdin> {
    name: String,
    lines: Arc<Mutex<Lines<BufReader<R>>>>,
}

impl HumanPlayer<Stdin> {
    /// Creates a human player reading from standard input.
    pub fn stdin(name: impl Into<String>) -> Self {
        Self::new(name, tokio::io::stdin())
    }
}

impl<R: AsyncRead + Unpin + Send> HumanPlayer<R> {
    /// Creates a human player reading from `input`.
    pub fn new(name: impl Into<String>, input: R) -> Self {
        Self {
            name: name.into(),
            lines: Arc::new(Mutex::new(BufReader::new(input).lines())),
        }
    }

    /// Another player reading from the same input.
    pub fn sharing_input(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Arc::clone(&self.lines),
        }
    }

    /// Reads the next line, `None` at end of input.
    pub async fn read_line(&self) -> Result<Option<String>> {
        Ok(self.lines.lock().await.next_line().await?)
    }
}

/// Reprompt listing the squares still free.
fn occupied_prompt(taken: Position, game: &Game) -> String {
    let free: Vec<String> = Position::valid_moves(game.board())
        .iter()
        .map(|pos| format!("{} ({})", pos.to_index(), pos.label().to_lowercase()))
        .collect();
    format!("{} is already taken. Free squares: {}", taken, free.join(", "))
}

#[async_trait::async_trait]
impl<R: AsyncRead + Unpin + Send> Player for HumanPlayer<R> {
    async fn get_move(&mut self, game: &Game) -> Result<usize> {
        loop {
            let Some(line) = self.read_line().await? else {
                anyhow::bail!("Input closed before {} moved", self.name);
            };

            match Position::from_label_or_number(&line) {
                Some(pos) if game.board().is_empty(pos.to_index()) => {
                    debug!(player = %self.name, position = %pos, "Human chose position");
                    return Ok(pos.to_index());
                }
                Some(pos) => println!("{}", occupied_prompt(pos, game)),
                None => {
                    warn!(input = %line.trim(), "Unrecognized square");
                    println!("Enter a number 0-8 or a square name such as 'center':");
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_human(&self) -> bool {
        true
    }
}
