//! Core game logic - pure, deterministic, and testable
//!
//! Board, shapes, collision, rotation and the engine itself. No terminal, no
//! clock, no I/O: randomness comes in through [`PieceSource`], so the same
//! seed (or scripted sequence) always plays the same game.
//!
//! # Module Structure
//!
//! - [`shapes`]: canonical piece matrices and `random_shape`
//! - [`board`]: 20x10 grid with merge and occupancy queries
//! - [`collision`]: bounds + overlap test (`is_valid_move`)
//! - [`transform`]: clockwise rotation of a shape
//! - [`rng`]: replaceable piece sources (uniform `rand`, scripted)
//! - [`game_state`]: the engine - spawn, move, rotate, gravity, lock, game over
//! - [`snapshot`]: read-only display grid for renderers
//!
//! # Game Rules
//!
//! - Pieces spawn at row 0, col 4 in their canonical orientation
//! - Left/right/rotate are applied only if the result fits; otherwise ignored
//! - Rotation is clockwise with no wall kicks
//! - A drop that cannot descend locks the piece and spawns the next one
//! - If the spawn position is blocked after a lock the game is over
//! - No line clears, no scoring, no levels
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::{GameState, SequenceSource, StepOutcome};
//! use tui_blockfall_core::types::{GameAction, PieceKind, Position};
//!
//! let mut game = GameState::new(SequenceSource::repeat(PieceKind::O));
//! assert_eq!(game.active().pos, Position::new(0, 4));
//!
//! game.apply_action(GameAction::MoveRight);
//! assert_eq!(game.tick(), StepOutcome::Fell);
//! assert_eq!(game.active().pos, Position::new(1, 5));
//! ```

pub mod board;
pub mod collision;
pub mod game_state;
pub mod rng;
pub mod shapes;
pub mod snapshot;
pub mod transform;

pub use tui_blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{in_bounds, is_valid_move};
pub use game_state::{GameState, Phase, SpawnProbe, StepOutcome, Tetromino};
pub use rng::{PieceSource, SequenceSource, UniformSource};
pub use shapes::{random_shape, shape_of, Shape, ShapeError};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use transform::rotate_cw;
