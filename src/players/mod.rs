//! Player trait and implementations.

mod computer;
mod human;

pub use computer::ComputerPlayer;
pub use human::HumanPlayer;

use crate::game::Game;
use anyhow::Result;

/// Trait for players that can make moves.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Gets a move from this player.
    ///
    /// Returns the square (0-8) for the next move.
    async fn get_move(&mut self, game: &Game) -> Result<usize>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// True when moves come from a person at the terminal.
    fn is_human(&self) -> bool {
        false
    }
}
