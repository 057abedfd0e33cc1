//! Fixed-period frame scheduling.
//!
//! The driver owns a `FrameClock` and calls `wait` once per frame; the game
//! state never schedules itself.

use std::time::{Duration, Instant};

/// Length of one frame at `frame_rate` frames per second.
pub fn frame_period(frame_rate: u32) -> Duration {
    Duration::from_secs(1) / frame_rate.max(1)
}

#[derive(Debug)]
pub struct FrameClock {
    period: Duration,
    next_deadline: Instant,
}

impl FrameClock {
    /// First deadline is one period from now.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_deadline: Instant::now() + period,
        }
    }

    /// Time left before the next deadline, zero if it has passed.
    #[cfg(test)]
    fn remaining(&self) -> Duration {
        self.next_deadline.saturating_duration_since(Instant::now())
    }

    /// Sleep until the next deadline, then schedule the one after it.
    ///
    /// A loop that falls more than a full period behind is re-anchored to
    /// the current time instead of running a burst of catch-up frames.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next_deadline {
            std::thread::sleep(self.next_deadline - now);
        }

        self.next_deadline += self.period;
        let now = Instant::now();
        if now > self.next_deadline {
            log::trace!(
                "frame overran by {:?}, resyncing",
                now - self.next_deadline
            );
            self.next_deadline = now + self.period;
        }
    }
}
