//! Board module - manages the game grid
//!
//! The board is a 20x10 grid where each cell is empty or remembers the piece
//! kind that filled it. Storage is a flat row-major array, so a board is a
//! plain `Copy` value and merging a piece can hand back an independent copy
//! without touching the original.
//! Coordinates: (row, col), row 0..19 top to bottom, col 0..9 left to right.

use crate::collision::in_bounds;
use crate::shapes::Shape;
use crate::types::{Cell, PieceKind, Position, BOARD_COLS, BOARD_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_ROWS as usize) * (BOARD_COLS as usize);

/// The game board - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if !in_bounds(row, col) {
            return None;
        }
        Some((row as usize) * (BOARD_COLS as usize) + (col as usize))
    }

    pub fn rows(&self) -> u8 {
        BOARD_ROWS
    }

    pub fn cols(&self) -> u8 {
        BOARD_COLS
    }

    /// Get cell at (row, col); `None` if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col). Returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Fill (or clear, with `None`) an entire row. Returns false if out of bounds
    pub fn fill_row(&mut self, row: i8, cell: Cell) -> bool {
        if !in_bounds(row, 0) {
            return false;
        }
        let start = row as usize * BOARD_COLS as usize;
        self.cells[start..start + BOARD_COLS as usize].fill(cell);
        true
    }

    /// True iff (row, col) is on the board and filled
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Copy of this board with every filled cell of `shape` at `pos` set to `kind`.
    ///
    /// The caller must have validated the placement: every target cell has to
    /// be in bounds. Overlapping filled cells are simply overwritten.
    ///
    /// # Panics
    ///
    /// If any filled cell of `shape` lands outside the board.
    pub fn merged(&self, shape: &Shape, pos: Position, kind: PieceKind) -> Board {
        let mut out = *self;
        for (dr, dc) in shape.cells() {
            let (row, col) = (pos.row + dr, pos.col + dc);
            match Self::index(row, col) {
                Some(idx) => out.cells[idx] = Some(kind),
                None => panic!("merge target ({}, {}) is outside the board", row, col),
            }
        }
        out
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Row slices, top to bottom
    pub fn row_slices(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_COLS as usize)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert to a 2D vector for testing/display
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.row_slices().map(|row| row.to_vec()).collect()
    }

    /// Write the grid into a fixed-size 2D array (snapshot hot path, no allocation).
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_COLS as usize]; BOARD_ROWS as usize]) {
        for (dst, src) in out.iter_mut().zip(self.row_slices()) {
            dst.copy_from_slice(src);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
