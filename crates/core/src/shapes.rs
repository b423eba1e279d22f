//! Shapes module - canonical piece geometries
//!
//! Each piece kind has one canonical orientation stored as a small boolean
//! matrix. Matrices are `Copy` values with private storage, so the library
//! definitions can be handed out freely and never mutated; rotation produces a
//! new matrix (see [`crate::transform`]).

use thiserror::Error;

use crate::rng::PieceSource;
use crate::types::PieceKind;

/// Largest row/column count a shape may have.
pub const MAX_SHAPE_DIM: usize = 4;

/// Rejected shape matrices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape matrix has no rows or no columns")]
    Empty,
    #[error("shape row {row} has {len} cells, expected {expected}")]
    Ragged { row: usize, len: usize, expected: usize },
    #[error("shape is {rows}x{cols}, larger than 4x4")]
    TooLarge { rows: usize, cols: usize },
}

/// Rectangular occupancy matrix of a piece in one orientation.
///
/// Only the top-left `rows x cols` corner of the backing array is meaningful;
/// the rest is always `false` so derived equality compares shapes exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from row slices.
    ///
    /// ```
    /// use tui_blockfall_core::Shape;
    ///
    /// let s = Shape::from_rows(&[&[true, true, false], &[false, true, true]]).unwrap();
    /// assert_eq!((s.rows(), s.cols()), (2, 3));
    /// assert!(Shape::from_rows(&[&[true], &[true, true]]).is_err());
    /// ```
    pub fn from_rows(rows: &[&[bool]]) -> Result<Self, ShapeError> {
        let cols = rows.first().map_or(0, |r| r.len());
        if rows.is_empty() || cols == 0 {
            return Err(ShapeError::Empty);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(ShapeError::Ragged {
                row,
                len: r.len(),
                expected: cols,
            });
        }
        if rows.len() > MAX_SHAPE_DIM || cols > MAX_SHAPE_DIM {
            return Err(ShapeError::TooLarge {
                rows: rows.len(),
                cols,
            });
        }

        let mut shape = Self::blank(rows.len() as u8, cols as u8);
        for (r, row) in rows.iter().enumerate() {
            shape.cells[r][..cols].copy_from_slice(row);
        }
        Ok(shape)
    }

    /// All-empty shape of the given size. Callers keep `rows, cols <= MAX_SHAPE_DIM`.
    pub(crate) const fn blank(rows: u8, cols: u8) -> Self {
        Self {
            rows,
            cols,
            cells: [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
        }
    }

    /// Const constructor for the library table (0/1 literals read better there).
    const fn literal(rows: u8, cols: u8, bits: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM]) -> Self {
        let mut shape = Self::blank(rows, cols);
        let mut r = 0;
        while r < rows as usize {
            let mut c = 0;
            while c < cols as usize {
                shape.cells[r][c] = bits[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        shape
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether `(row, col)` is filled. Out-of-matrix coordinates are empty.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, filled: bool) {
        self.cells[row][col] = filled;
    }

    /// Filled cells as `(row, col)` offsets from the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (r as i8, c as i8))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.cells().count()
    }
}

const I_SHAPE: Shape = Shape::literal(1, 4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]);
const J_SHAPE: Shape = Shape::literal(2, 3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const L_SHAPE: Shape = Shape::literal(2, 3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const O_SHAPE: Shape = Shape::literal(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const S_SHAPE: Shape = Shape::literal(2, 3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const T_SHAPE: Shape = Shape::literal(2, 3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const Z_SHAPE: Shape = Shape::literal(2, 3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]);

/// Canonical (spawn) orientation for a piece kind
pub fn shape_of(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Draw a kind from `source` and return it with its canonical shape.
pub fn random_shape(source: &mut impl PieceSource) -> (PieceKind, Shape) {
    let kind = source.next_kind();
    (kind, shape_of(kind))
}
