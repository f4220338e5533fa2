//! Timing and task primitives.

use spin::Once;
use std::time::Duration;

mod context;
mod instant;
mod r#loop;

pub use context::*;
pub use instant::*;
pub use r#loop::*;

static START: Once<std::time::Instant> = Once::new();

#[inline]
/// Gets the current timestamp (i.e., the time which has passed since program
/// start).
///
/// "Program start" is the first call to this function, which
/// [`Competition::new`](crate::robot::Competition::new) makes.
pub fn time_since_start() -> Instant {
    let start = START.call_once(std::time::Instant::now);
    Instant::from_micros(start.elapsed().as_micros() as u64)
}

/// Represents the current task.
pub struct Task;

impl Task {
    #[inline]
    /// Delays the current task by the specified duration.
    pub fn delay(dur: Duration) {
        std::thread::sleep(dur);
    }
}
