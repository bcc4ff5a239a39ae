//! Mancala-Rust: Kalah with a minimax opponent.
//!
//! ## Usage
//!
//! - `mancala-rust` - Play human vs. minimax on the console
//! - `mancala-rust play --player1 minimax --player2 random` - Pick strategies
//! - `mancala-rust demo` - Watch minimax play a random opponent
//! - `mancala-rust bench --depth 7` - Time sequential vs. parallel search

use std::io;
use std::time::Instant;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use mancala_rust::board::{Board, Player};
use mancala_rust::constants::DEFAULT_MAX_DEPTH;
use mancala_rust::game::{Game, GameConfig};
use mancala_rust::search::{Minimax, SearchConfig};
use mancala_rust::strategy::Strategy;

/// Mancala-Rust: Kalah with a minimax opponent
#[derive(Parser)]
#[command(name = "mancala-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log search progress at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game on the console
    Play(PlayArgs),
    /// Play minimax against a random opponent
    Demo {
        /// Ply limit for the minimax player
        #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
        depth: usize,
        /// Seed for random choices (defaults to entropy)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Time sequential and parallel search from the opening position
    Bench {
        /// Ply limit for the search
        #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
        depth: usize,
    },
}

#[derive(Args)]
struct PlayArgs {
    /// Strategy for Player 1
    #[arg(long, value_enum, default_value_t = Strategy::Human)]
    player1: Strategy,
    /// Strategy for Player 2
    #[arg(long, value_enum, default_value_t = Strategy::Minimax)]
    player2: Strategy,
    /// Ply limit for minimax players
    #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
    depth: usize,
    /// Seed for random choices (defaults to entropy)
    #[arg(long)]
    seed: Option<u64>,
    /// Trace every node the search visits (very noisy)
    #[arg(long)]
    trace: bool,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            player1: Strategy::Human,
            player2: Strategy::Minimax,
            depth: DEFAULT_MAX_DEPTH,
            seed: None,
            trace: false,
        }
    }
}

impl PlayArgs {
    fn into_config(self) -> GameConfig {
        GameConfig {
            strategies: [self.player1, self.player2],
            max_depth: self.depth,
            seed: self.seed,
            trace: self.trace,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Some(Commands::Play(args)) => run_game(args.into_config()),
        Some(Commands::Demo { depth, seed }) => run_game(GameConfig {
            strategies: [Strategy::ParallelMinimax, Strategy::Random],
            max_depth: depth,
            seed,
            trace: false,
        }),
        Some(Commands::Bench { depth }) => {
            run_bench(depth);
            Ok(())
        }
        None => run_game(PlayArgs::default().into_config()),
    }
}

fn run_game(config: GameConfig) -> Result<()> {
    println!(
        "Mancala: {} vs. {}\n",
        config.strategies[0], config.strategies[1]
    );
    let mut game = Game::new(config);
    game.play(io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}

fn run_bench(depth: usize) {
    let board = Board::new();
    let engine = Minimax::new(SearchConfig::default().with_max_depth(depth));
    let mut rng = fastrand::Rng::new();

    let start = Instant::now();
    let seq = engine.search(&board, Player::One, &mut rng);
    let seq_time = start.elapsed();

    let start = Instant::now();
    let par = engine.search_parallel(&board, Player::One, &mut rng);
    let par_time = start.elapsed();

    println!("depth {depth}");
    println!(
        "sequential: move {:?} score {} in {:.2?}",
        seq.best_move, seq.score, seq_time
    );
    println!(
        "parallel:   move {:?} score {} in {:.2?}",
        par.best_move, par.score, par_time
    );
}
