//! Mancala-Rust: Kalah with a minimax opponent.
//!
//! This crate implements the Kalah variant of Mancala together with an
//! automated player that searches the full game tree to a fixed depth.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and search parameters
//! - [`side`] - One player's pits and store, and sowing along them
//! - [`board`] - Move application, captures, extra turns and scoring
//! - [`search`] - Sequential and parallel minimax search
//! - [`strategy`] - Human, random and minimax move selection
//! - [`game`] - Console game loop
//!
//! ## Example
//!
//! ```
//! use mancala_rust::board::{Board, Player};
//! use mancala_rust::search::{Minimax, SearchConfig};
//!
//! // Create a new game
//! let mut board = Board::new();
//!
//! // Play a move; pit 2 lands in the store, so Player One goes again
//! let extra_turn = board.apply_move(Player::One, 2).unwrap();
//! assert!(extra_turn);
//!
//! // Search for the best follow-up
//! let engine = Minimax::new(SearchConfig::default().with_max_depth(4));
//! let mut rng = fastrand::Rng::with_seed(7);
//! let pit = engine.choose_move(&board, Player::One, &mut rng).unwrap();
//! assert!(board.legal_moves(Player::One).contains(&pit));
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod search;
pub mod side;
pub mod strategy;
