//! Tictac - unified CLI
//!
//! Play tic-tac-toe in the terminal, pit computer players against each
//! other, or query the engine for a single board.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tictac::{AppConfig, ComputerPlayer, GameEvent, HumanPlayer, Orchestrator, Player};
use tictac_engine::{choose_move, detect_outcome, Board, Difficulty, Mark, Outcome};
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();
    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            difficulty,
            computer_mark,
            two_player,
            seed,
            think_delay_ms,
        } => {
            let mut config = AppConfig::load_or_default(&cli.config)?;
            if let Some(difficulty) = difficulty {
                config = config.with_difficulty(difficulty);
            }
            if let Some(mark) = computer_mark {
                config = config.with_computer_mark(mark);
            }
            if let Some(two_player) = two_player {
                config = config.with_two_player(two_player);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            if let Some(delay) = think_delay_ms {
                config = config.with_think_delay_ms(delay);
            }
            config.validate()?;
            run_play(config).await
        }
        Command::SelfPlay {
            games,
            x_difficulty,
            o_difficulty,
            seed,
            verbose,
        } => run_self_play(games, x_difficulty, o_difficulty, seed, verbose).await,
        Command::Suggest {
            board,
            mark,
            difficulty,
            seed,
        } => run_suggest(board, mark, difficulty, seed),
        Command::Outcome { board } => run_outcome(board),
    }
}

/// Installs the stderr subscriber; stdout is reserved for the board.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,tictac=info,tictac_engine=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Builds the computer player described by `config`.
fn computer_player(
    name: &str,
    mark: Mark,
    difficulty: Difficulty,
    config: &AppConfig,
) -> ComputerPlayer {
    let player = match config.seed() {
        Some(seed) => ComputerPlayer::seeded(name, mark, difficulty, *seed),
        None => ComputerPlayer::new(name, mark, difficulty),
    };
    player.with_think_delay(config.think_delay())
}

/// Human against computer (or human against human) in the terminal.
///
/// Rounds repeat until the players quit; between rounds they may keep the
/// score or clear it.
#[instrument(
    skip(config),
    fields(difficulty = %config.difficulty(), two_player = config.two_player())
)]
async fn run_play(config: AppConfig) -> Result<()> {
    info!("Starting terminal game");

    let menu = HumanPlayer::stdin("Menu");
    let (player_x, player_o): (Box<dyn Player>, Box<dyn Player>) = if *config.two_player() {
        let first: Box<dyn Player> = Box::new(menu.sharing_input("Player X"));
        let second: Box<dyn Player> = Box::new(menu.sharing_input("Player O"));
        (first, second)
    } else {
        let computer_mark = *config.computer_mark();
        let computer: Box<dyn Player> = Box::new(computer_player(
            "Computer",
            computer_mark,
            *config.difficulty(),
            &config,
        ));
        let human: Box<dyn Player> = Box::new(menu.sharing_input("You"));
        match computer_mark {
            Mark::X => (computer, human),
            Mark::O => (human, computer),
        }
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_events(rx, true));

    let mut orchestrator = Orchestrator::new(player_x, player_o, tx);
    let score = orchestrator.run_session(&menu).await?;
    drop(orchestrator);
    printer.await?;

    println!("Final score: {}", score);
    info!(%score, "Session finished");
    Ok(())
}

/// Computer against computer.
#[instrument]
async fn run_self_play(
    games: u32,
    x_difficulty: Difficulty,
    o_difficulty: Difficulty,
    seed: Option<u64>,
    verbose: bool,
) -> Result<()> {
    let player = |name: &str, mark: Mark, difficulty: Difficulty, offset: u64| -> Box<dyn Player> {
        match seed {
            Some(seed) => Box::new(ComputerPlayer::seeded(
                name,
                mark,
                difficulty,
                seed.wrapping_add(offset),
            )),
            None => Box::new(ComputerPlayer::new(name, mark, difficulty)),
        }
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_events(rx, verbose));

    let mut orchestrator = Orchestrator::new(
        player(&format!("X ({})", x_difficulty), Mark::X, x_difficulty, 0),
        player(&format!("O ({})", o_difficulty), Mark::O, o_difficulty, 1),
        tx,
    );
    let score = orchestrator.run(games).await?;
    drop(orchestrator);
    printer.await?;

    println!("Final score after {} games: {}", score.rounds(), score);
    Ok(())
}

/// Prints the engine's move for one board.
fn run_suggest(
    board: Board,
    mark: Option<Mark>,
    difficulty: Difficulty,
    seed: Option<u64>,
) -> Result<()> {
    let mark = mark.unwrap_or_else(|| board.to_move());
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let index = choose_move(&board, mark, difficulty, &mut rng)?;
    println!("{}", index);
    Ok(())
}

/// Prints the outcome of one board as JSON.
fn run_outcome(board: Board) -> Result<()> {
    let outcome = detect_outcome(&board);
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

/// Renders orchestrator events until the channel closes.
async fn print_events(mut rx: mpsc::UnboundedReceiver<GameEvent>, verbose: bool) {
    while let Some(event) = rx.recv().await {
        match event {
            GameEvent::RoundStarted { round } if verbose => println!("\n=== Round {} ===", round),
            GameEvent::AwaitingInput { player, mark } => {
                println!("{} ({}), your move [0-8 or square name]:", player, mark)
            }
            GameEvent::Thinking { player } if verbose => println!("{} is thinking...", player),
            GameEvent::MoveMade {
                player,
                mark,
                position,
            } if verbose => println!("{} placed {} at {}", player, mark, position),
            GameEvent::StateChanged(board) if verbose => println!("\n{}\n", board),
            GameEvent::GameOver { outcome, winner } => print_game_over(&outcome, winner.as_deref()),
            GameEvent::ScoreUpdated(score) if verbose => println!("Score  {}", score),
            GameEvent::AwaitingChoice => {
                println!("Play again? [r]eplay, [h]ard reset (clear score), [q]uit:")
            }
            _ => {}
        }
    }
}

fn print_game_over(outcome: &Outcome, winner: Option<&str>) {
    match (outcome, winner) {
        (Outcome::Win { line, class, .. }, Some(name)) => {
            println!("{} wins on {} {:?}!", name, class, line.cells)
        }
        (Outcome::Tie, _) => println!("It's a tie!"),
        _ => {}
    }
}
