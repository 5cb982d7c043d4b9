//! Static position evaluation used at the search horizon.
//!
//! The score is a weighted stone and liberty differential:
//!
//! ```text
//! STONE_WEIGHT * (own stones - opponent stones)
//!     + LIBERTY_WEIGHT * (own liberties - opponent liberties)
//! ```
//!
//! A color's liberties are the distinct empty points next to any of its
//! groups, so a shared liberty counts once.

use std::collections::BTreeSet;

use crate::board::{Board, Color, Point};
use crate::constants::{LIBERTY_WEIGHT, STONE_WEIGHT};

/// Distinct empty points adjacent to stones of `color`.
pub fn liberty_count(board: &Board, color: Color) -> usize {
    board
        .groups()
        .filter(|g| g.color() == color)
        .flat_map(|g| g.liberties().iter().copied())
        .collect::<BTreeSet<Point>>()
        .len()
}

/// Utility of `board` from the point of view of `color`.
pub fn evaluate(board: &Board, color: Color) -> i32 {
    let opp = color.opponent();
    let stones = board.stone_count(color) as i32 - board.stone_count(opp) as i32;
    let liberties = liberty_count(board, color) as i32 - liberty_count(board, opp) as i32;
    STONE_WEIGHT * stones + LIBERTY_WEIGHT * liberties
}
