//! Move-selection strategies a player can be configured with.

use std::fmt;

use clap::ValueEnum;

use crate::board::{Board, MoveError, Player};
use crate::search::Minimax;

/// How a player picks their moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Read pit indices from the input
    Human,
    /// Any legal move, uniformly at random
    Random,
    /// Sequential minimax search
    Minimax,
    /// Minimax with the top plies searched in parallel
    #[value(name = "parallel")]
    ParallelMinimax,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Human => "human",
            Strategy::Random => "random",
            Strategy::Minimax => "minimax",
            Strategy::ParallelMinimax => "parallel minimax",
        };
        f.write_str(name)
    }
}

impl Strategy {
    /// Whether this strategy needs moves typed in by a person.
    pub fn is_interactive(self) -> bool {
        self == Strategy::Human
    }

    /// Pick a move for `player` with an automated strategy.
    ///
    /// Returns `None` for `Human`, whose moves come from the input instead.
    pub fn select_move(
        self,
        board: &Board,
        player: Player,
        engine: &Minimax,
        rng: &mut fastrand::Rng,
    ) -> Option<Result<usize, MoveError>> {
        match self {
            Strategy::Human => None,
            Strategy::Random => Some(random_move(board, player, rng)),
            Strategy::Minimax => Some(engine.choose_move(board, player, rng)),
            Strategy::ParallelMinimax => Some(engine.choose_move_parallel(board, player, rng)),
        }
    }
}

/// A uniformly random legal move for `player`.
pub fn random_move(board: &Board, player: Player, rng: &mut fastrand::Rng) -> Result<usize, MoveError> {
    let moves = board.legal_moves(player);
    if moves.is_empty() {
        return Err(MoveError::NoLegalMoves);
    }
    Ok(moves[rng.usize(..moves.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PITS;
    use crate::search::SearchConfig;

    #[test]
    fn test_random_move_is_legal() {
        let board = Board::from_counts([0, 3, 0, 1, 0, 0], 0, [4; PITS], 0);
        let mut rng = fastrand::Rng::with_seed(17);
        for _ in 0..100 {
            let pit = random_move(&board, Player::One, &mut rng).unwrap();
            assert!(pit == 1 || pit == 3);
        }
    }

    #[test]
    fn test_random_move_without_moves() {
        let board = Board::from_counts([0; PITS], 10, [4; PITS], 0);
        let mut rng = fastrand::Rng::with_seed(17);
        assert_eq!(
            random_move(&board, Player::One, &mut rng),
            Err(MoveError::NoLegalMoves)
        );
    }

    #[test]
    fn test_human_has_no_automatic_move() {
        let board = Board::new();
        let engine = Minimax::new(SearchConfig::default().with_max_depth(1));
        let mut rng = fastrand::Rng::with_seed(1);
        assert!(Strategy::Human.is_interactive());
        assert!(
            Strategy::Human
                .select_move(&board, Player::One, &engine, &mut rng)
                .is_none()
        );
    }

    #[test]
    fn test_automated_strategies_pick_legal_moves() {
        let board = Board::new();
        let engine = Minimax::new(SearchConfig::default().with_max_depth(2));
        let mut rng = fastrand::Rng::with_seed(1);
        let legal = board.legal_moves(Player::Two);
        for strategy in [Strategy::Random, Strategy::Minimax, Strategy::ParallelMinimax] {
            let pit = strategy
                .select_move(&board, Player::Two, &engine, &mut rng)
                .unwrap()
                .unwrap();
            assert!(legal.contains(&pit), "{strategy} picked {pit}");
        }
    }
}
