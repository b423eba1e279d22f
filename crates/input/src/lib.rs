//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. Only key
//! presses matter: each press is one command, terminal auto-repeat included,
//! and releases are ignored.

pub mod map;

pub use tui_blockfall_types as types;

pub use map::{handle_key_event, should_quit};
