//! Collision module - placement validity
//!
//! [`in_bounds`] is the only bounds predicate in the crate; the board's own
//! indexing goes through it too.

use crate::board::Board;
use crate::shapes::Shape;
use crate::types::{Position, BOARD_COLS, BOARD_ROWS};

/// Whether (row, col) lies on the board.
#[inline(always)]
pub fn in_bounds(row: i8, col: i8) -> bool {
    row >= 0 && row < BOARD_ROWS as i8 && col >= 0 && col < BOARD_COLS as i8
}

/// True iff every filled cell of `shape` at `pos` is on the board and empty.
///
/// A shape with no filled cells is always valid.
pub fn is_valid_move(board: &Board, shape: &Shape, pos: Position) -> bool {
    shape.cells().all(|(dr, dc)| {
        let (row, col) = (pos.row + dr, pos.col + dc);
        in_bounds(row, col) && !board.is_occupied(row, col)
    })
}
