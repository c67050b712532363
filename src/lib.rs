//! Tictac - terminal tic-tac-toe against a minimax computer opponent.
//!
//! The rules and the decision engine live in [`tictac_engine`]; this crate
//! is their caller. It owns the authoritative board, alternates turns,
//! keeps score and renders the game in the terminal.
//!
//! # Architecture
//!
//! - **Game**: the session board, turn order and last outcome
//! - **Scoreboard**: wins and ties across rounds
//! - **Players**: humans on stdin, computer players backed by the engine
//! - **Orchestrator**: runs rounds and streams events to the display
//! - **Config**: TOML settings with CLI overrides

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod game;
mod orchestrator;
mod players;
mod scoreboard;

pub use config::{AppConfig, ConfigError};
pub use game::{Game, MoveError};
pub use orchestrator::{GameEvent, NextRound, Orchestrator};
pub use players::{ComputerPlayer, HumanPlayer, Player};
pub use scoreboard::Scoreboard;
