//! Session: one game, one command queue, one gravity clock.
//!
//! The clock and the key reader are producers; [`Session::pump`] is the only
//! consumer and applies commands to the game strictly in arrival order, so
//! each command sees the result of the one before it.

use std::time::Duration;

use crate::clock::GravityClock;
use crate::core::{GameSnapshot, GameState, PieceSource, UniformSource};
use crate::queue::{CommandQueue, QueueFull};
use crate::types::GameAction;

#[derive(Debug, Clone)]
pub struct Session<S = UniformSource> {
    game: GameState<S>,
    queue: CommandQueue,
    clock: GravityClock,
    applied: u64,
}

impl<S: PieceSource> Session<S> {
    pub fn new(game: GameState<S>, tick_ms: u32) -> Self {
        let mut clock = GravityClock::new(tick_ms);
        if game.game_over() {
            clock.stop();
        }
        Self {
            game,
            queue: CommandQueue::new(),
            clock,
            applied: 0,
        }
    }

    /// Enqueue a player command.
    pub fn submit(&mut self, action: GameAction) -> Result<(), QueueFull> {
        self.queue.push(action).inspect_err(|err| {
            tracing::warn!(%err, "dropping player command");
        })
    }

    /// Let `elapsed` pass on the gravity clock, enqueueing a `Tick` per
    /// elapsed interval. Returns how many ticks were enqueued.
    ///
    /// Ticks that do not fit in the queue are handed back to the clock and
    /// enqueued by a later call once [`Session::pump`] has made room.
    pub fn advance_clock(&mut self, elapsed: Duration) -> u32 {
        let due = self.clock.advance(elapsed);
        let mut queued = 0;
        while queued < due && self.queue.push(GameAction::Tick).is_ok() {
            queued += 1;
        }
        if queued < due {
            tracing::debug!(
                deferred = due - queued,
                "command queue full, deferring gravity ticks"
            );
            self.clock.defer(due - queued);
        }
        queued
    }

    /// Apply every queued command in order. Returns how many were applied.
    ///
    /// Reaching game over stops the clock; a restart starts it again.
    pub fn pump(&mut self) -> usize {
        let mut count = 0;
        for action in self.queue.drain() {
            let was_over = self.game.game_over();
            self.game.apply_action(action);
            count += 1;

            match (was_over, self.game.game_over()) {
                (false, true) => {
                    tracing::info!(
                        locked = self.game.pieces_locked(),
                        "game over, stopping gravity clock"
                    );
                    self.clock.stop();
                }
                (true, false) => self.clock.restart(),
                _ => {}
            }
        }
        self.applied += count as u64;
        count
    }

    /// Stop the clock for good, e.g. when the host view is torn down.
    pub fn shutdown(&mut self) {
        self.clock.stop();
        self.queue.clear();
    }

    pub fn game(&self) -> &GameState<S> {
        &self.game
    }

    pub fn clock(&self) -> &GravityClock {
        &self.clock
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Total commands applied over the session's life.
    pub fn applied(&self) -> u64 {
        self.applied
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }
}
