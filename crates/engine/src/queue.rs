//! Ordered command queue shared by the gravity clock and the key reader.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::types::GameAction;

/// Maximum number of pending commands between two pumps.
pub const QUEUE_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("command queue full ({capacity} pending), rejected {action:?}")]
pub struct QueueFull {
    pub action: GameAction,
    pub capacity: usize,
}

/// Bounded FIFO of commands. Stack-only; never reorders or coalesces.
///
/// When full, new commands are rejected and everything already queued stays
/// in order.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: ArrayVec<GameAction, QUEUE_CAPACITY>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: GameAction) -> Result<(), QueueFull> {
        self.pending.try_push(action).map_err(|_| QueueFull {
            action,
            capacity: QUEUE_CAPACITY,
        })
    }

    /// Remove and yield every pending command, oldest first.
    pub fn drain(&mut self) -> arrayvec::Drain<'_, GameAction, QUEUE_CAPACITY> {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
