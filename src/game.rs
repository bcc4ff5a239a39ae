//! Console game loop.
//!
//! Drives a game between two configured [`Strategy`]s, printing the board
//! before every move. Human players type a pit index (0-5) on a line of their
//! own; anything that is not a legal move is rejected and asked for again.
//!
//! ## Example
//!
//! ```ignore
//! use mancala_rust::game::{Game, GameConfig};
//! let mut game = Game::new(GameConfig::default());
//! game.play(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use log::info;

use crate::board::{Board, Player};
use crate::constants::DEFAULT_MAX_DEPTH;
use crate::search::{Minimax, SearchConfig};
use crate::strategy::Strategy;

/// Settings for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Strategy for Player One and Player Two
    pub strategies: [Strategy; 2],
    /// Ply limit for the minimax strategies
    pub max_depth: usize,
    /// Seed for every random choice; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Trace every node visited by the search
    pub trace: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            strategies: [Strategy::Human, Strategy::Minimax],
            max_depth: DEFAULT_MAX_DEPTH,
            seed: None,
            trace: false,
        }
    }
}

/// A game in progress.
pub struct Game {
    board: Board,
    to_move: Player,
    strategies: [Strategy; 2],
    engine: Minimax,
    rng: fastrand::Rng,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let search = SearchConfig::default()
            .with_max_depth(config.max_depth)
            .with_trace(config.trace);
        Self {
            board: Board::new(),
            to_move: Player::One,
            strategies: config.strategies,
            engine: Minimax::new(search),
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Play until the game ends and return the winner (`None` for a draw).
    pub fn play<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<Option<Player>> {
        while !self.board.is_terminal() {
            writeln!(output, "{}", self.board)?;
            if !self.step(&mut input, &mut output)? {
                break;
            }
        }

        writeln!(output, "{}", self.board)?;
        let winner = self.board.winner();
        match winner {
            Some(player) => writeln!(output, "{player} wins!")?,
            None => writeln!(output, "It's a draw!")?,
        }
        info!(
            "Game over: {} - {}",
            self.board.store(Player::One),
            self.board.store(Player::Two)
        );
        output.flush()?;
        Ok(winner)
    }

    /// Play a single move for the side to act.
    ///
    /// Returns `false` once the game is over: the side to act had no moves and
    /// the remaining stones were swept into the stores.
    pub fn step<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<bool> {
        let player = self.to_move;
        if self.board.legal_moves(player).is_empty() {
            writeln!(output, "No moves available for {player}, ending game")?;
            self.board.cleanup();
            return Ok(false);
        }

        writeln!(output, "{player}'s turn")?;
        let strategy = self.strategies[player.index()];
        let pit = match strategy.select_move(&self.board, player, &self.engine, &mut self.rng) {
            Some(choice) => choice.with_context(|| format!("{strategy} failed to pick a move"))?,
            None => read_human_move(&self.board, player, input, output)?,
        };

        writeln!(output, "Moving pit {pit}")?;
        let extra_turn = self.board.apply_move(player, pit)?;
        if extra_turn {
            writeln!(output, "Move again!")?;
        } else {
            self.to_move = player.opponent();
        }
        Ok(true)
    }
}

/// Prompt until the input names a legal pit for `player`.
fn read_human_move<R: BufRead, W: Write>(
    board: &Board,
    player: Player,
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    let legal = board.legal_moves(player);
    loop {
        write!(output, "Enter move > ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read move")? == 0 {
            bail!("input closed before {player} entered a move");
        }

        match line.trim().parse::<usize>() {
            Ok(pit) if legal.contains(&pit) => return Ok(pit),
            Ok(pit) => writeln!(
                output,
                "Invalid move: pit {pit} is empty or out of range, pick one of {legal:?}"
            )?,
            Err(err) => writeln!(
                output,
                "Invalid move: {err}, type the number of a pit with stones in it"
            )?,
        }
    }
}
