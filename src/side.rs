//! One player's half of the board: six pits and a store.

use crate::constants::{INITIAL_STONES, PITS, STORE};

/// Outcome of sowing stones along one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sowing {
    /// Stones still undistributed after reaching the store.
    pub remaining: u32,
    /// Last position that received a stone: `0..PITS` for a pit, `STORE` for the store.
    pub last: usize,
}

/// A player's six pits plus their store (mancala).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Side {
    pub pits: [u32; PITS],
    pub store: u32,
}

impl Default for Side {
    fn default() -> Self {
        Self::new()
    }
}

impl Side {
    /// A side at the start of a game: every pit holds `INITIAL_STONES`, the store is empty.
    pub fn new() -> Self {
        Self {
            pits: [INITIAL_STONES; PITS],
            store: 0,
        }
    }

    /// Build a side from explicit counts.
    pub fn from_counts(pits: [u32; PITS], store: u32) -> Self {
        Self { pits, store }
    }

    /// Whether `pit` names a non-empty pit on this side.
    #[inline]
    pub fn is_legal(&self, pit: usize) -> bool {
        pit < PITS && self.pits[pit] > 0
    }

    /// Pit indices holding at least one stone, in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..PITS).filter(|&pit| self.pits[pit] > 0).collect()
    }

    /// Stones currently sitting in the pits (store excluded).
    pub fn pit_stones(&self) -> u32 {
        self.pits.iter().sum()
    }

    /// Stones on this side, pits and store together.
    pub fn total(&self) -> u32 {
        self.pit_stones() + self.store
    }

    /// Drop one stone per position from `start` upward, ending at the store at the latest.
    ///
    /// Sowing never wraps onto the opponent's pits; stones left over after the
    /// store are returned in [`Sowing::remaining`] for the caller to continue.
    pub fn sow(&mut self, start: usize, stones: u32) -> Sowing {
        if stones == 0 {
            return Sowing {
                remaining: 0,
                last: start,
            };
        }

        let mut remaining = stones;
        let mut last = start;
        for pit in start..PITS {
            if remaining == 0 {
                break;
            }
            self.pits[pit] += 1;
            remaining -= 1;
            last = pit;
        }
        if remaining > 0 {
            self.store += 1;
            remaining -= 1;
            last = STORE;
        }

        Sowing { remaining, last }
    }

    /// Empty `pit` and sow its stones starting at the next position.
    pub fn start_move(&mut self, pit: usize) -> Sowing {
        let stones = std::mem::take(&mut self.pits[pit]);
        self.sow(pit + 1, stones)
    }

    /// Sweep every pit into the store. Calling it again is a no-op.
    pub fn cleanup(&mut self) {
        self.store += self.pit_stones();
        self.pits = [0; PITS];
    }
}
