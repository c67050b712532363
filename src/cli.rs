//! Command-line interface for tictac.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictac_engine::{Board, Difficulty, Mark};

/// Tic-tac-toe against a minimax computer opponent
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Tic-tac-toe against a minimax computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "tictac.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal against the computer or another human
    Play {
        /// Computer difficulty (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Mark the computer plays (x moves first)
        #[arg(long)]
        computer_mark: Option<Mark>,

        /// Two humans take turns; no computer (`--two-player false` for one)
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        two_player: Option<bool>,

        /// Seed for the computer's random choices
        #[arg(long)]
        seed: Option<u64>,

        /// Computer thinking pause in milliseconds
        #[arg(long)]
        think_delay_ms: Option<u64>,
    },

    /// Let two computer players play each other and report the tally
    SelfPlay {
        /// Number of games
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Difficulty of the X player
        #[arg(long, default_value = "hard")]
        x_difficulty: Difficulty,

        /// Difficulty of the O player
        #[arg(long, default_value = "hard")]
        o_difficulty: Difficulty,

        /// Seed for both players' random choices
        #[arg(long)]
        seed: Option<u64>,

        /// Print every move and board
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the move the computer would choose on a board
    Suggest {
        /// Board as nine cells, e.g. "xx.oo...." (x, o, or . _ - for empty)
        #[arg(short, long)]
        board: Board,

        /// Mark to move; inferred from the board when omitted
        #[arg(short, long)]
        mark: Option<Mark>,

        /// Difficulty (easy, medium, hard)
        #[arg(short, long, default_value = "hard")]
        difficulty: Difficulty,

        /// Seed for the random choice
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the outcome of a board as JSON
    Outcome {
        /// Board as nine cells, e.g. "xxxoo...."
        #[arg(short, long)]
        board: Board,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suggest() {
        let cli = Cli::try_parse_from([
            "tictac", "suggest", "--board", "xx.oo....", "--mark", "x", "-d", "easy",
        ])
        .unwrap();
        match cli.command {
            Command::Suggest {
                board,
                mark,
                difficulty,
                seed,
            } => {
                assert_eq!(board.available_moves(), vec![2, 5, 6, 7, 8]);
                assert_eq!(mark, Some(Mark::X));
                assert_eq!(difficulty, Difficulty::Easy);
                assert_eq!(seed, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    fn two_player_flag(args: &[&str]) -> Option<bool> {
        let cli = Cli::try_parse_from(["tictac", "play"].iter().chain(args)).unwrap();
        match cli.command {
            Command::Play { two_player, .. } => two_player,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_two_player_flag_overrides_either_way() {
        assert_eq!(two_player_flag(&[]), None);
        assert_eq!(two_player_flag(&["--two-player"]), Some(true));
        assert_eq!(two_player_flag(&["--two-player", "false"]), Some(false));
        assert_eq!(two_player_flag(&["--two-player=true"]), Some(true));
    }

    #[test]
    fn test_rejects_malformed_board() {
        assert!(Cli::try_parse_from(["tictac", "outcome", "--board", "xx"]).is_err());
        assert!(Cli::try_parse_from(["tictac", "outcome", "--board", "xx.oo...z"]).is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
