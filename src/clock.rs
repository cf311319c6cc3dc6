// src/clock.rs
// =============================================================================
// Time sources for deadline checks and profiling.
//
// The crawl never calls Instant::now() directly. It asks a Clock, so tests
// can freeze or step time and get deterministic deadline behavior.
//
// Rust concepts:
// - Traits: Clock is an interface with two implementations
// - Send + Sync: the clock is shared by tasks on many threads
// =============================================================================

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A source of monotonic instants.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

// A clock that only moves when told to
//
// `step` is added after every call to now(), which lets a test simulate
// time passing while the crawl runs without sleeping.
#[derive(Debug)]
pub struct FakeClock {
    current: Mutex<Instant>,
    step: Duration,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::with_step(Duration::ZERO)
    }

    pub fn with_step(step: Duration) -> Self {
        Self {
            current: Mutex::new(Instant::now()),
            step,
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let now = *current;
        *current += self.step;
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_clock_is_frozen() {
        let clock = FakeClock::new();
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_fake_clock_advance() {
        let clock = FakeClock::new();
        let before = clock.now();
        clock.advance(Duration::from_secs(5));
        assert_eq!(clock.now() - before, Duration::from_secs(5));
    }

    #[test]
    fn test_fake_clock_step() {
        let clock = FakeClock::with_step(Duration::from_millis(10));
        let first = clock.now();
        let second = clock.now();
        assert_eq!(second - first, Duration::from_millis(10));
    }
}
