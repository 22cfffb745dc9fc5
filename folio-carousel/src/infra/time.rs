//! Time providers
//!
//! The carousel never reads ambient time directly. Production hosts use
//! [`SystemClock`]; tests and simulations drive a [`ManualClock`] so cooldowns
//! and animations can be fast-forwarded deterministically.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Trait for providing time in tests and production
pub trait Clock {
    /// Get the current instant
    fn now(&self) -> Instant;
}

/// Production time provider that uses real system time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Virtual time provider. Clones share the same timeline.
#[derive(Clone, Debug)]
pub struct ManualClock {
    instant: Rc<Cell<Instant>>,
    base: Instant,
}

impl ManualClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            instant: Rc::new(Cell::new(now)),
            base: now,
        }
    }

    /// Advance time by a duration
    pub fn advance(&self, duration: Duration) {
        self.instant.set(self.instant.get() + duration);
    }

    /// Advance time by whole milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Virtual time elapsed since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.instant.get().saturating_duration_since(self.base)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.instant.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_timeline() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = clock.now();

        other.advance_ms(250);

        assert_eq!(clock.now() - start, Duration::from_millis(250));
        assert_eq!(clock.elapsed(), Duration::from_millis(250));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
