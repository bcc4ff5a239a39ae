//! Depth-limited minimax search.
//!
//! The engine explores every legal continuation to a fixed ply limit and
//! scores leaves by store difference from the root player's perspective:
//! - A side with no legal moves is a leaf scored on the cleaned-up board
//! - Reaching `max_depth` is a leaf scored on the board as-is
//! - An extra turn keeps the same player to move at the same depth
//!
//! Nodes where the root player moves keep the first child with the highest
//! score; nodes where the opponent moves keep the first with the lowest. At
//! the root, ties for the best score are broken uniformly at random through
//! the caller's `fastrand::Rng`.
//!
//! [`Minimax::search_parallel`] runs the same algorithm but fans the top
//! plies out over the rayon thread pool. Each task owns its board copy and
//! results are collected in move order, so both variants agree on the score.

use log::{debug, trace};
use rayon::prelude::*;

use crate::board::{Board, MoveError, Player};
use crate::constants::{DEFAULT_MAX_DEPTH, PARALLEL_DEPTH};

/// Search engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Ply limit. Extra turns do not count against it.
    pub max_depth: usize,
    /// Emit a `trace!` line for every node visited
    pub trace: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            trace: false,
        }
    }
}

impl SearchConfig {
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

/// A move paired with the score its subtree backed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveScore {
    pub pit: usize,
    pub score: i32,
}

/// Result of a search from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Chosen pit, or `None` when the root player had no legal moves
    pub best_move: Option<usize>,
    /// Backed-up score from the root player's perspective
    pub score: i32,
}

/// Minimax search engine.
#[derive(Debug, Clone, Default)]
pub struct Minimax {
    config: SearchConfig,
}

impl Minimax {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Pick a move for `player` using sequential search.
    pub fn choose_move(
        &self,
        board: &Board,
        player: Player,
        rng: &mut fastrand::Rng,
    ) -> Result<usize, MoveError> {
        self.search(board, player, rng)
            .best_move
            .ok_or(MoveError::NoLegalMoves)
    }

    /// Pick a move for `player` using parallel search.
    pub fn choose_move_parallel(
        &self,
        board: &Board,
        player: Player,
        rng: &mut fastrand::Rng,
    ) -> Result<usize, MoveError> {
        self.search_parallel(board, player, rng)
            .best_move
            .ok_or(MoveError::NoLegalMoves)
    }

    /// Sequential search from `board` with `player` to move.
    pub fn search(&self, board: &Board, player: Player, rng: &mut fastrand::Rng) -> SearchResult {
        debug!(
            "Searching for {player} to depth {} (sequential)",
            self.config.max_depth
        );
        let result = match self.no_moves_score(board, player, player, 0) {
            Some(score) => SearchResult {
                best_move: None,
                score,
            },
            None => {
                let results = self.expand(board, player, player, 0);
                pick_random_move(results, rng)
            }
        };
        debug!("Search picked {:?} with score {}", result.best_move, result.score);
        result
    }

    /// Parallel search from `board` with `player` to move.
    pub fn search_parallel(
        &self,
        board: &Board,
        player: Player,
        rng: &mut fastrand::Rng,
    ) -> SearchResult {
        debug!(
            "Searching for {player} to depth {} (parallel)",
            self.config.max_depth
        );
        let result = match self.no_moves_score(board, player, player, 0) {
            Some(score) => SearchResult {
                best_move: None,
                score,
            },
            None => {
                let results = self.expand_parallel(board, player, player, 0);
                pick_random_move(results, rng)
            }
        };
        debug!("Search picked {:?} with score {}", result.best_move, result.score);
        result
    }

    /// Score of the cleaned-up board if `to_move` has no legal moves.
    fn no_moves_score(&self, board: &Board, root: Player, to_move: Player, depth: usize) -> Option<i32> {
        if !board.legal_moves(to_move).is_empty() {
            return None;
        }
        let mut cleaned = *board;
        cleaned.cleanup();
        if self.config.trace {
            trace!("depth {depth}: {to_move} has no moves, leaf");
        }
        Some(cleaned.score(root))
    }

    /// Score `board` if it is a leaf, otherwise `None`.
    ///
    /// The root is never a depth-limit leaf: a side with moves always gets
    /// one, and a limit of 0 scores each root move on the position it leaves.
    fn leaf_score(&self, board: &Board, root: Player, to_move: Player, depth: usize) -> Option<i32> {
        if let Some(score) = self.no_moves_score(board, root, to_move, depth) {
            return Some(score);
        }
        if depth >= self.config.max_depth {
            if self.config.trace {
                trace!("depth {depth}: max depth reached, leaf");
            }
            return Some(board.score(root));
        }
        None
    }

    /// Apply `pit` to a copy of `board` and return the child position with
    /// the side to move and depth it is searched at.
    fn child(
        &self,
        board: &Board,
        to_move: Player,
        pit: usize,
        depth: usize,
    ) -> (Board, Player, usize) {
        if self.config.trace {
            trace!("depth {depth}: {to_move} plays pit {pit}");
        }
        let mut next = *board;
        match next.apply_move(to_move, pit) {
            Ok(true) => (next, to_move, depth),
            Ok(false) => (next, to_move.opponent(), depth + 1),
            Err(err) => unreachable!("{to_move} pit {pit} came from legal_moves: {err}"),
        }
    }

    /// Score every legal move of `to_move`, in pit order.
    fn expand(&self, board: &Board, root: Player, to_move: Player, depth: usize) -> Vec<MoveScore> {
        let moves = board.legal_moves(to_move);
        if self.config.trace {
            trace!("depth {depth}: {to_move} to move, moves {moves:?}");
        }
        moves
            .into_iter()
            .map(|pit| {
                let (next, next_player, next_depth) = self.child(board, to_move, pit, depth);
                MoveScore {
                    pit,
                    score: self.minimax(&next, root, next_player, next_depth),
                }
            })
            .collect()
    }

    fn minimax(&self, board: &Board, root: Player, to_move: Player, depth: usize) -> i32 {
        if let Some(score) = self.leaf_score(board, root, to_move, depth) {
            return score;
        }
        let results = self.expand(board, root, to_move, depth);
        back_up(&results, to_move == root).score
    }

    /// Like [`Self::expand`], but each move's subtree runs as its own rayon task.
    fn expand_parallel(
        &self,
        board: &Board,
        root: Player,
        to_move: Player,
        depth: usize,
    ) -> Vec<MoveScore> {
        let moves = board.legal_moves(to_move);
        if self.config.trace {
            trace!("depth {depth}: {to_move} to move, moves {moves:?} (parallel)");
        }
        moves
            .into_par_iter()
            .map(|pit| {
                let (next, next_player, next_depth) = self.child(board, to_move, pit, depth);
                MoveScore {
                    pit,
                    score: self.minimax_parallel(&next, root, next_player, next_depth),
                }
            })
            .collect()
    }

    fn minimax_parallel(&self, board: &Board, root: Player, to_move: Player, depth: usize) -> i32 {
        if depth > PARALLEL_DEPTH {
            return self.minimax(board, root, to_move, depth);
        }
        if let Some(score) = self.leaf_score(board, root, to_move, depth) {
            return score;
        }
        let results = self.expand_parallel(board, root, to_move, depth);
        back_up(&results, to_move == root).score
    }
}

/// First result with the best score: highest when maximizing, lowest otherwise.
fn back_up(results: &[MoveScore], maximizing: bool) -> MoveScore {
    let mut best = results[0];
    for result in &results[1..] {
        let better = if maximizing {
            result.score > best.score
        } else {
            result.score < best.score
        };
        if better {
            best = *result;
        }
    }
    best
}

/// Pick uniformly at random among the moves tied for the highest score.
///
/// Results are stably sorted by score, so with a fixed random sequence the
/// choice is deterministic.
pub fn pick_random_move(mut results: Vec<MoveScore>, rng: &mut fastrand::Rng) -> SearchResult {
    results.sort_by(|a, b| b.score.cmp(&a.score));
    let Some(first) = results.first() else {
        return SearchResult {
            best_move: None,
            score: 0,
        };
    };
    let ties = results.iter().take_while(|r| r.score == first.score).count();
    let picked = results[rng.usize(..ties)];
    SearchResult {
        best_move: Some(picked.pit),
        score: picked.score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PITS;

    fn engine(depth: usize) -> Minimax {
        Minimax::new(SearchConfig::default().with_max_depth(depth))
    }

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!config.trace);
    }

    #[test]
    fn test_back_up_keeps_first_best() {
        let results = [
            MoveScore { pit: 0, score: 2 },
            MoveScore { pit: 1, score: 5 },
            MoveScore { pit: 3, score: 5 },
            MoveScore { pit: 4, score: -1 },
        ];
        assert_eq!(back_up(&results, true), MoveScore { pit: 1, score: 5 });
        assert_eq!(back_up(&results, false), MoveScore { pit: 4, score: -1 });
    }

    #[test]
    fn test_pick_random_move_only_from_ties() {
        let results = vec![
            MoveScore { pit: 0, score: 1 },
            MoveScore { pit: 2, score: 3 },
            MoveScore { pit: 4, score: 3 },
            MoveScore { pit: 5, score: 0 },
        ];
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..50 {
            let picked = pick_random_move(results.clone(), &mut rng);
            assert_eq!(picked.score, 3);
            assert!(matches!(picked.best_move, Some(2) | Some(4)));
        }
    }

    #[test]
    fn test_pick_random_move_reaches_every_tie() {
        let results = vec![
            MoveScore { pit: 1, score: 0 },
            MoveScore { pit: 3, score: 0 },
        ];
        let mut rng = fastrand::Rng::with_seed(11);
        let mut seen = [false; PITS];
        for _ in 0..200 {
            if let Some(pit) = pick_random_move(results.clone(), &mut rng).best_move {
                seen[pit] = true;
            }
        }
        assert!(seen[1] && seen[3]);
    }

    #[test]
    fn test_pick_random_move_deterministic_with_seed() {
        let results = vec![
            MoveScore { pit: 0, score: 4 },
            MoveScore { pit: 1, score: 4 },
            MoveScore { pit: 2, score: 4 },
        ];
        let a: Vec<_> = {
            let mut rng = fastrand::Rng::with_seed(99);
            (0..10)
                .map(|_| pick_random_move(results.clone(), &mut rng))
                .collect()
        };
        let b: Vec<_> = {
            let mut rng = fastrand::Rng::with_seed(99);
            (0..10)
                .map(|_| pick_random_move(results.clone(), &mut rng))
                .collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_depth_zero_still_picks_a_move() {
        let board = Board::new();
        let legal = board.legal_moves(Player::One);
        let mut rng = fastrand::Rng::with_seed(1);

        let seq = engine(0).choose_move(&board, Player::One, &mut rng).unwrap();
        let par = engine(0)
            .choose_move_parallel(&board, Player::One, &mut rng)
            .unwrap();
        assert!(legal.contains(&seq));
        assert!(legal.contains(&par));

        // Without extra turns in play, a limit of 0 scores the root's children
        // exactly like a limit of 1.
        let board = Board::from_counts([1, 0, 0, 0, 0, 2], 0, [1, 1, 1, 1, 9, 1], 0);
        let shallow = engine(0).search(&board, Player::One, &mut rng);
        assert_eq!(shallow, engine(1).search(&board, Player::One, &mut rng));
        assert_eq!(shallow.best_move, Some(0));
    }

    #[test]
    #[should_panic(expected = "came from legal_moves")]
    fn test_child_rejects_illegal_pit() {
        let board = Board::from_counts([0, 4, 4, 4, 4, 4], 0, [4; PITS], 0);
        engine(2).child(&board, Player::One, 0, 0);
    }

    #[test]
    fn test_no_legal_moves_scores_cleaned_board() {
        let board = Board::from_counts([0; PITS], 20, [1, 2, 3, 0, 0, 0], 22);
        let mut rng = fastrand::Rng::with_seed(1);
        let result = engine(3).search(&board, Player::One, &mut rng);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 20 - 28);
        assert_eq!(
            engine(3).choose_move(&board, Player::One, &mut rng),
            Err(MoveError::NoLegalMoves)
        );
        assert_eq!(
            engine(3).choose_move_parallel(&board, Player::One, &mut rng),
            Err(MoveError::NoLegalMoves)
        );
    }

    #[test]
    fn test_depth_one_takes_capture() {
        // Pit 0 drops its stone into empty pit 1, capturing the 9 stones
        // opposite. Every other move scores at most 1.
        let board = Board::from_counts([1, 0, 0, 0, 0, 2], 0, [1, 1, 1, 1, 9, 1], 0);
        let mut rng = fastrand::Rng::with_seed(3);
        let result = engine(1).search(&board, Player::One, &mut rng);
        assert_eq!(result.best_move, Some(0));
        assert_eq!(result.score, 10);
    }

    #[test]
    fn test_extra_turn_does_not_consume_depth() {
        // Pit 5 banks its stone for an extra turn, then pit 4 and pit 5 bank
        // the rest. Only a search that treats extra turns as free sees the
        // whole chain within one ply.
        let board = Board::from_counts([0, 0, 0, 0, 2, 1], 0, [1, 0, 0, 0, 0, 0], 0);
        let mut rng = fastrand::Rng::with_seed(5);
        let result = engine(1).search(&board, Player::One, &mut rng);
        assert_eq!(result.score, 3 - 1);
    }

    #[test]
    fn test_opponent_reply_changes_choice() {
        // Pit 2 captures two stones right away, but it leaves Player Two a
        // capture in return; one ply deeper the quiet pit 0 is preferred.
        let board = Board::from_counts([2, 0, 2, 0, 0, 0], 0, [0, 1, 0, 0, 1, 0], 0);
        let mut rng = fastrand::Rng::with_seed(5);

        let shallow = engine(1).search(&board, Player::One, &mut rng);
        assert_eq!(shallow.best_move, Some(2));
        assert_eq!(shallow.score, 2);

        let deep = engine(2).search(&board, Player::One, &mut rng);
        assert_eq!(deep.best_move, Some(0));
        assert_eq!(deep.score, 0);
    }

    #[test]
    fn test_parallel_matches_sequential_from_opening() {
        let board = Board::new();
        for depth in 1..=4 {
            let minimax = engine(depth);
            let mut rng = fastrand::Rng::with_seed(42);
            let seq = minimax.search(&board, Player::One, &mut rng);
            let mut rng = fastrand::Rng::with_seed(42);
            let par = minimax.search_parallel(&board, Player::One, &mut rng);
            assert_eq!(seq.score, par.score, "depth {depth}");
            assert_eq!(seq.best_move, par.best_move, "depth {depth}");
        }
    }

    #[test]
    fn test_search_does_not_mutate_board() {
        let board = Board::new();
        let mut rng = fastrand::Rng::with_seed(8);
        engine(3).search_parallel(&board, Player::Two, &mut rng);
        assert_eq!(board, Board::new());
    }
}
