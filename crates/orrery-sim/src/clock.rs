//! Time sources for the render loop.

use std::time::Instant;

/// Monotonic time source, in seconds since the clock started.
pub trait Clock {
    fn elapsed_time(&self) -> f64;
}

/// Wall-clock time measured from construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_time(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// A clock moved explicitly by its owner.
///
/// Gives deterministic frame timing for headless runs and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.now += dt;
    }

    /// Sets the clock to an absolute time.
    pub fn set(&mut self, now: f64) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn elapsed_time(&self) -> f64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.elapsed_time();
        let b = clock.elapsed_time();
        assert!(a >= 0.0);
        assert!(b >= a);
    }

    #[test]
    fn test_manual_clock_advance_and_set() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.elapsed_time(), 0.0);
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.elapsed_time(), 0.75);
        clock.set(10.0);
        assert_eq!(clock.elapsed_time(), 10.0);
    }
}
