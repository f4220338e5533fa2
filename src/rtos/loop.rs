use std::time::Duration;

use super::{time_since_start, Instant, Task};

/// A source of fixed-cadence ticks for a control loop.
///
/// The loop body runs once per tick; [`TickSource::delay()`] blocks (or
/// pretends to) until the next one is due.
pub trait TickSource {
    /// The current time as seen by this tick source.
    fn now(&self) -> Instant;

    /// Delays until the next tick.
    fn delay(&mut self);

    /// The configured period between ticks.
    fn period(&self) -> Duration;
}

/// Provides a constant-period looping construct on the real clock.
pub struct Loop {
    delta: Duration,
    next: Instant,
}

impl Loop {
    #[inline]
    /// Creates a new loop object with a given period.
    pub fn new(delta: Duration) -> Self {
        Loop {
            delta,
            next: time_since_start() + delta,
        }
    }
}

impl TickSource for Loop {
    #[inline]
    fn now(&self) -> Instant {
        time_since_start()
    }

    /// Delays until the next loop cycle. If the loop body overran, the next
    /// cycle starts immediately and the schedule is not shifted.
    fn delay(&mut self) {
        if let Some(d) = self.next.checked_sub_instant(time_since_start()) {
            Task::delay(d);
        }
        self.next += self.delta;
    }

    #[inline]
    fn period(&self) -> Duration {
        self.delta
    }
}

/// A logical clock which advances by one period per tick without sleeping.
///
/// Lets a control loop be driven for an exact number of ticks; pair it with a
/// [`Context`](super::Context) whose deadline is `n` periods from the start.
#[derive(Debug, Clone)]
pub struct LogicalClock {
    delta: Duration,
    now: Instant,
    ticks: u64,
}

impl LogicalClock {
    /// Creates a logical clock starting at [`Instant::ZERO`].
    pub fn new(delta: Duration) -> Self {
        Self {
            delta,
            now: Instant::ZERO,
            ticks: 0,
        }
    }

    /// The number of completed ticks (calls to [`TickSource::delay()`]).
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The instant at which `ticks` ticks from now will have elapsed.
    pub fn after_ticks(&self, ticks: u32) -> Instant {
        self.now + self.delta * ticks
    }
}

impl TickSource for LogicalClock {
    #[inline]
    fn now(&self) -> Instant {
        self.now
    }

    fn delay(&mut self) {
        self.now += self.delta;
        self.ticks += 1;
    }

    #[inline]
    fn period(&self) -> Duration {
        self.delta
    }
}
