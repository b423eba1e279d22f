//! Piece transform - clockwise rotation of a shape matrix
//!
//! No board, no position, no kicks: the engine validates the rotated shape at
//! the current position and keeps the old one if it does not fit.

use crate::shapes::Shape;

/// Rotate 90° clockwise (transpose, then reverse each row).
///
/// A `rows x cols` input yields a `cols x rows` output.
///
/// ```
/// use tui_blockfall_core::{rotate_cw, shape_of};
/// use tui_blockfall_core::types::PieceKind;
///
/// let i = shape_of(PieceKind::I);
/// let vertical = rotate_cw(&i);
/// assert_eq!((vertical.rows(), vertical.cols()), (4, 1));
/// ```
pub fn rotate_cw(shape: &Shape) -> Shape {
    let (rows, cols) = (shape.rows() as usize, shape.cols() as usize);
    let mut out = Shape::blank(cols as u8, rows as u8);
    for r in 0..cols {
        for c in 0..rows {
            out.set(r, c, shape.get(rows - 1 - c, r));
        }
    }
    out
}
