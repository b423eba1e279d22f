use crate::game_state::Tetromino;
use crate::shapes::Shape;
use crate::types::{Cell, PieceKind, Position, BOARD_COLS, BOARD_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub pos: Position,
}

impl ActiveSnapshot {
    /// Whether the piece covers board cell (row, col).
    pub fn covers(&self, row: i8, col: i8) -> bool {
        self.shape
            .cells()
            .any(|(dr, dc)| self.pos.row + dr == row && self.pos.col + dc == col)
    }
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            pos: value.pos,
        }
    }
}

/// Read-only view handed to renderers: the display grid (locked cells plus
/// the active piece) and the game-over flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_COLS as usize]; BOARD_ROWS as usize],
    pub active: Option<ActiveSnapshot>,
    pub game_over: bool,
    pub pieces_locked: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_COLS as usize]; BOARD_ROWS as usize],
            active: None,
            game_over: false,
            pieces_locked: 0,
        }
    }
}
