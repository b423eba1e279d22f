//! Session driver - turns a clock and a key reader into ordered engine calls.
//!
//! The core engine is synchronous and knows nothing about time. This crate
//! supplies the host side:
//!
//! - [`GravityClock`]: accumulates elapsed time and reports due ticks;
//!   cancellable, and stopped automatically once the game is over
//! - [`CommandQueue`]: bounded FIFO that both producers push into
//! - [`Session`]: owns the single `GameState` and drains the queue into it

pub mod clock;
pub mod queue;
pub mod session;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use clock::GravityClock;
pub use queue::{CommandQueue, QueueFull, QUEUE_CAPACITY};
pub use session::Session;
