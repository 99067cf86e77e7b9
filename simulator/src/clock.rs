//! Virtual wall clock.
//!
//! The simulator never reads the system clock after startup: time is the start
//! instant plus virtual elapsed milliseconds, so headless runs are deterministic.

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use watchface_common::TickUnit;

pub struct SimClock {
    start: NaiveDateTime,
    elapsed_ms: u64,
}

impl SimClock {
    /// Create a clock at `start`, dropping any sub-second part.
    pub fn new(start: NaiveDateTime) -> Self {
        let start = start.with_nanosecond(0).unwrap_or(start);
        Self { start, elapsed_ms: 0 }
    }

    /// Current virtual wall time.
    pub fn now(&self) -> NaiveDateTime {
        self.start + TimeDelta::milliseconds(self.elapsed_ms as i64)
    }

    #[inline]
    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Move forward to `elapsed_ms`. Time never goes backwards.
    pub fn advance_to(
        &mut self,
        elapsed_ms: u64,
    ) {
        self.elapsed_ms = self.elapsed_ms.max(elapsed_ms);
    }

    /// Elapsed time of the next whole `unit` boundary strictly after now.
    pub fn next_boundary(
        &self,
        unit: TickUnit,
    ) -> u64 {
        let next_second = self.elapsed_ms / 1000 + 1;
        match unit {
            TickUnit::Second => next_second * 1000,
            TickUnit::Minute => {
                let wall_second = u64::from(self.start.second()) + next_second;
                let pad = (60 - wall_second % 60) % 60;
                (next_second + pad) * 1000
            }
        }
    }
}
