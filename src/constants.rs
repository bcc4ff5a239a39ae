//! Constants for board dimensions and search parameters.
//!
//! Each side is laid out as six pits followed by its store, so a sowing
//! position on one side is an index in `0..=STORE`.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of pits on each side of the board.
pub const PITS: usize = 6;

/// Position index of a side's store (one past the last pit).
pub const STORE: usize = PITS;

/// Stones placed in every pit at the start of a game.
pub const INITIAL_STONES: u32 = 4;

/// Total stones in play for a standard game (conserved by every move).
pub const TOTAL_STONES: u32 = INITIAL_STONES * PITS as u32 * 2;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default ply limit for minimax search.
pub const DEFAULT_MAX_DEPTH: usize = 7;

/// Deepest ply at which the parallel search still fans out across threads.
/// Nodes below this depth are searched sequentially.
pub const PARALLEL_DEPTH: usize = 1;
