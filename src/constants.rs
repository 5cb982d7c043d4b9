//! Board dimensions, search limits and evaluation weights.
//!
//! Points are 1-based: row and column 0 and `size + 1` form the padding
//! border around the playable grid and are never on the board.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
pub const DEFAULT_BOARD_SIZE: usize = 19;

/// Smallest accepted board size.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest accepted board size (column letters A-Z without I).
pub const MAX_BOARD_SIZE: usize = 25;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default number of plies explored by the alpha-beta agent.
pub const DEFAULT_SEARCH_DEPTH: u8 = 1;

/// Deepest search accepted from the command line. Every ply multiplies the
/// work by the number of legal points, so depths above 2 only suit small boards.
pub const MAX_SEARCH_DEPTH: u8 = 4;

// =============================================================================
// Match Limits
// =============================================================================

/// Moves per board point after which a match between two programmed agents
/// is stopped when no explicit limit is given. Without a ko rule two
/// deterministic agents can retake the same point forever.
pub const DEFAULT_MAX_MOVES_PER_POINT: usize = 4;

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Score per stone of difference between the two colors.
pub const STONE_WEIGHT: i32 = 10;

/// Score per liberty of difference between the two colors.
pub const LIBERTY_WEIGHT: i32 = 1;

/// Utility of a won position. Larger than any heuristic value.
pub const WIN_SCORE: i32 = 1_000_000;

/// Bound used as "infinity" for the alpha-beta window.
pub const INF: i32 = WIN_SCORE + 1;
