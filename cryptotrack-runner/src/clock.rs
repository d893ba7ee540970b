//! Time sources for the poll loop.
//!
//! The loop never calls `std::thread::sleep` or `Local::now` directly, so
//! tests can drive it with scripted time and no real delays.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{NaiveDateTime, Timelike};

/// Wall-clock source for snapshot timestamps.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local time, truncated to whole seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = chrono::Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepOutcome {
    Elapsed,
    Interrupted,
}

/// Interruptible wait between poll cycles.
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> SleepOutcome;
}

/// Sleeps in short slices, returning early once the stop flag is raised.
#[derive(Debug, Clone)]
pub struct InterruptibleSleeper {
    stop: Arc<AtomicBool>,
    slice: Duration,
}

impl InterruptibleSleeper {
    pub fn new(stop: Arc<AtomicBool>) -> Self {
        Self {
            stop,
            slice: Duration::from_millis(200),
        }
    }

    pub fn with_slice(mut self, slice: Duration) -> Self {
        self.slice = slice;
        self
    }
}

impl Sleeper for InterruptibleSleeper {
    fn sleep(&self, duration: Duration) -> SleepOutcome {
        // A wait too long to represent as an `Instant` only ends on the flag.
        let deadline = Instant::now().checked_add(duration);
        loop {
            if self.stop.load(Ordering::Relaxed) {
                return SleepOutcome::Interrupted;
            }
            let remaining = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return SleepOutcome::Elapsed;
                    }
                    deadline - now
                }
                None => self.slice,
            };
            std::thread::sleep(self.slice.min(remaining));
        }
    }
}
