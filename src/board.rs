//! Kalah board state and move application.
//!
//! The board owns two [`Side`]s indexed by [`Player`]. A move sows the stones
//! of one pit counter-clockwise: the mover's remaining pits, the mover's
//! store, then the opponent's pits and store, and round again until the
//! stones run out.
//!
//! `Board` is `Copy`, so every copy is fully independent. Search relies on
//! this to explore hypothetical moves without touching the caller's board.

use std::fmt;

use crate::constants::{PITS, STORE};
use crate::side::Side;

/// Player identity. `One` moves first and owns side 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Side index for this player (0 or 1).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Player owning side `index`, if it is 0 or 1.
    pub fn from_index(index: usize) -> Option<Player> {
        match index {
            0 => Some(Player::One),
            1 => Some(Player::Two),
            _ => None,
        }
    }

    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Error raised when a move cannot be applied or selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Pit index outside 0..6, or the pit is empty
    InvalidMove(usize),
    /// The side to act has no stones in any pit
    NoLegalMoves,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidMove(pit) if *pit >= PITS => {
                write!(f, "Invalid move: pit {pit} is out of range 0-{}", PITS - 1)
            }
            MoveError::InvalidMove(pit) => write!(f, "Invalid move: pit {pit} is empty"),
            MoveError::NoLegalMoves => write!(f, "No legal moves available"),
        }
    }
}

impl std::error::Error for MoveError {}

/// A Kalah board: two sides of six pits and a store each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    sides: [Side; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Starting board: four stones in every pit, both stores empty.
    pub fn new() -> Self {
        Self {
            sides: [Side::new(), Side::new()],
        }
    }

    /// Build a board from explicit sides, e.g. to set up a test position.
    pub fn from_sides(one: Side, two: Side) -> Self {
        Self { sides: [one, two] }
    }

    /// Build a board from raw pit and store counts for each player.
    pub fn from_counts(
        pits_one: [u32; PITS],
        store_one: u32,
        pits_two: [u32; PITS],
        store_two: u32,
    ) -> Self {
        Self::from_sides(
            Side::from_counts(pits_one, store_one),
            Side::from_counts(pits_two, store_two),
        )
    }

    #[inline]
    pub fn side(&self, player: Player) -> &Side {
        &self.sides[player.index()]
    }

    #[inline]
    fn side_mut(&mut self, player: Player) -> &mut Side {
        &mut self.sides[player.index()]
    }

    /// Stones in `player`'s store.
    #[inline]
    pub fn store(&self, player: Player) -> u32 {
        self.side(player).store
    }

    /// Total stones on the board, pits and stores of both sides.
    pub fn total_stones(&self) -> u32 {
        self.sides.iter().map(Side::total).sum()
    }

    /// Legal moves for `player`: pit indices with at least one stone, ascending.
    pub fn legal_moves(&self, player: Player) -> Vec<usize> {
        self.side(player).legal_moves()
    }

    /// Apply `player`'s move from `pit`.
    ///
    /// Returns `Ok(true)` when the last stone lands in the mover's own store,
    /// meaning the same player moves again. On error the board is unchanged.
    pub fn apply_move(&mut self, player: Player, pit: usize) -> Result<bool, MoveError> {
        if !self.side(player).is_legal(pit) {
            return Err(MoveError::InvalidMove(pit));
        }

        let sowing = self.side_mut(player).start_move(pit);
        if sowing.remaining == 0 {
            if sowing.last == STORE {
                return Ok(true);
            }
            self.check_capture(player, sowing.last);
        }

        // Overflow continues on alternating sides, starting with the opponent's pit 0.
        let mut remaining = sowing.remaining;
        let mut current = player;
        while remaining > 0 {
            current = current.opponent();
            remaining = self.side_mut(current).sow(0, remaining).remaining;
        }
        Ok(false)
    }

    /// Capture if the mover's landing pit was empty before this sow and the
    /// mirror pit on the opponent's side holds stones.
    fn check_capture(&mut self, player: Player, pit: usize) {
        let mirror = PITS - 1 - pit;
        let landed = self.side(player).pits[pit];
        let opposite = self.side(player.opponent()).pits[mirror];
        if landed != 1 || opposite == 0 {
            return;
        }

        self.side_mut(player.opponent()).pits[mirror] = 0;
        let side = self.side_mut(player);
        side.pits[pit] = 0;
        side.store += landed + opposite;
    }

    /// True when every pit on both sides is empty.
    pub fn is_terminal(&self) -> bool {
        self.sides.iter().all(|side| side.pit_stones() == 0)
    }

    /// Sweep each side's remaining pit stones into that side's own store.
    pub fn cleanup(&mut self) {
        for side in &mut self.sides {
            side.cleanup();
        }
    }

    /// Player with strictly more stones in their store, or `None` on a tie.
    pub fn winner(&self) -> Option<Player> {
        let (one, two) = (self.store(Player::One), self.store(Player::Two));
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Some(Player::One),
            std::cmp::Ordering::Less => Some(Player::Two),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Store difference from `player`'s perspective.
    #[inline]
    pub fn score(&self, player: Player) -> i32 {
        self.store(player) as i32 - self.store(player.opponent()) as i32
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let one = self.side(Player::One);
        let two = self.side(Player::Two);
        let rule = format!("      +{}", "----+".repeat(PITS));

        // Player Two's pits run right-to-left across the top row.
        write!(f, "       ")?;
        for pit in (0..PITS).rev() {
            write!(f, "{pit:^5}")?;
        }
        writeln!(f, "   {}", Player::Two)?;
        writeln!(f, "{rule}")?;
        write!(f, "      |")?;
        for pit in (0..PITS).rev() {
            write!(f, "{:>3} |", two.pits[pit])?;
        }
        writeln!(f)?;
        writeln!(f, "{:>4}  {:width$}{:>4}", two.store, "", one.store, width = 1 + 5 * PITS)?;
        write!(f, "      |")?;
        for pit in 0..PITS {
            write!(f, "{:>3} |", one.pits[pit])?;
        }
        writeln!(f)?;
        writeln!(f, "{rule}")?;
        write!(f, "       ")?;
        for pit in 0..PITS {
            write!(f, "{pit:^5}")?;
        }
        writeln!(f, "   {}", Player::One)
    }
}
