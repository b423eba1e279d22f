//! Terminal "game renderer" module.
//!
//! Renders a `GameSnapshot` into a framebuffer of styled characters and
//! flushes it to the terminal with crossterm, re-emitting only what changed.
//!
//! - `core` stays deterministic and never sees the terminal
//! - each board cell is drawn 2 characters wide to keep cells roughly square

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
