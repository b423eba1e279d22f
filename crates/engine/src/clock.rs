use std::time::Duration;

/// Fixed-period gravity timer driven by elapsed wall time.
///
/// The host calls [`GravityClock::advance`] with however much time passed
/// since the last call; the clock answers how many gravity ticks fell due.
/// Leftover time carries over at full `Duration` precision, so neither a slow
/// frame nor a burst of sub-millisecond polls loses or stretches ticks.
#[derive(Debug, Clone)]
pub struct GravityClock {
    interval: Duration,
    accumulated: Duration,
    running: bool,
}

impl GravityClock {
    /// A zero interval is treated as 1ms.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms.max(1) as u64),
            accumulated: Duration::ZERO,
            running: true,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of ticks due after `elapsed` more time. Always 0 once stopped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulated = self.accumulated.saturating_add(elapsed);
        let due = (self.accumulated.as_nanos() / self.interval.as_nanos()).min(u32::MAX as u128) as u32;
        self.accumulated -= self.interval * due;
        due
    }

    /// Hand back `ticks` that were reported due but could not be delivered.
    /// They fall due again on the next [`GravityClock::advance`].
    pub fn defer(&mut self, ticks: u32) {
        if self.running {
            self.accumulated = self
                .accumulated
                .saturating_add(self.interval.saturating_mul(ticks));
        }
    }

    /// Cancel: no more ticks until [`GravityClock::restart`].
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated = Duration::ZERO;
    }

    /// Start again from a full interval.
    pub fn restart(&mut self) {
        self.running = true;
        self.accumulated = Duration::ZERO;
    }
}
