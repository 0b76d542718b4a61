//! Constants for the board, the search, and the difficulty presets.
//!
//! The board is the standard 106-position, five-sided Poly-Y board. Its
//! geometry lives in [`crate::board`] as fixed lookup tables; this module only
//! holds scalar parameters.

// =============================================================================
// Board
// =============================================================================

/// Number of playable positions on the board.
pub const POSITIONS: usize = 106;

/// Number of outer sides (and corners) of the board.
pub const SIDES: usize = 5;

/// Sentinel for "no move" (position ids start at 1).
pub const NO_MOVE: usize = 0;

/// Pie-rule swap marker in externally supplied move histories.
pub const SWAP_MOVE: i32 = -1;

// =============================================================================
// Playout Sampler Parameters
// =============================================================================

/// Number of playouts per batch at tree nodes. Has a huge effect on
/// performance: every `expand` call costs exactly one batch.
pub const SAMPLES: u32 = 32;

/// While more than this many positions remain, random playout moves with edge
/// distance below 2 are rejected (roughly the first ten moves of a game).
pub const OPENING_BIAS_THRESHOLD: usize = 96;

/// While more than this many positions remain, random playout moves on the
/// edge itself are rejected. Below it, no bias.
pub const EDGE_BIAS_THRESHOLD: usize = 50;

/// Upper bound on pattern matches for a single key position; the sampler's
/// candidate stack is sized to this.
pub const PATTERN_STACK: usize = 8;

// =============================================================================
// Search Tree Parameters
// =============================================================================

/// Blending weight between AMAF statistics and a child's own win rate in the
/// selection score (alpha-AMAF).
pub const ALPHA: f64 = 0.75;

/// Selection score forced onto moves with no AMAF samples, so every move is
/// explored once before the blend is trusted.
pub const UNEXPLORED_SCORE: f64 = 100.0;

// =============================================================================
// Difficulty Presets
// =============================================================================

/// Weakest supported difficulty level (4 iterations).
pub const MIN_DIFFICULTY: u32 = 1;

/// Reasonable starting level (64 iterations).
pub const MEDIUM_DIFFICULTY: u32 = 5;

/// Level from which the opening book is enabled (2048 iterations).
pub const HARD_DIFFICULTY: u32 = 10;

/// Strongest supported difficulty level (65536 iterations).
pub const MAX_DIFFICULTY: u32 = 15;
