//! Frame pacing for the headless host.
//!
//! Plays the role of a display's presentation timer: after each frame it
//! sleeps until the next frame deadline. When the host falls far behind it
//! resynchronises instead of rushing frames out to catch up.

use std::time::{Duration, Instant};
use tracing::warn;

/// Lag beyond which the schedule is reset rather than caught up.
pub const MAX_LAG_FRAMES: u32 = 4;

/// Sleeps between frames to hold a target frame rate.
pub struct FramePacer {
    frame_period: Option<Duration>,
    next_deadline: Instant,
}

impl FramePacer {
    /// `target_fps` of 0 disables pacing.
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_period: frame_period(target_fps),
            next_deadline: Instant::now(),
        }
    }

    pub fn frame_period(&self) -> Option<Duration> {
        self.frame_period
    }

    /// Blocks until the next frame is due.
    pub fn wait(&mut self) {
        let Some(period) = self.frame_period else {
            return;
        };

        let now = Instant::now();
        let (sleep, next) = schedule(now, self.next_deadline, period);
        if now > self.next_deadline + period * MAX_LAG_FRAMES {
            warn!(
                "Host fell {:.1}ms behind, resynchronising",
                (now - self.next_deadline).as_secs_f64() * 1000.0
            );
        }
        self.next_deadline = next;
        if !sleep.is_zero() {
            std::thread::sleep(sleep);
        }
    }
}

/// Duration of one frame at `target_fps`, or `None` when unpaced.
pub fn frame_period(target_fps: u32) -> Option<Duration> {
    (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(target_fps)))
}

/// Returns how long to sleep from `now` and the deadline after that.
///
/// The next deadline advances by exactly one period so pacing does not
/// drift. If `now` is more than [`MAX_LAG_FRAMES`] periods past `deadline`,
/// the schedule restarts from `now`.
pub fn schedule(now: Instant, deadline: Instant, period: Duration) -> (Duration, Instant) {
    let next = deadline + period;
    if now > deadline + period * MAX_LAG_FRAMES {
        return (Duration::ZERO, now + period);
    }
    (next.saturating_duration_since(now), next)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(16);

    #[test]
    fn test_frame_period() {
        assert_eq!(frame_period(0), None);
        let p = frame_period(60).unwrap();
        assert!((p.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_on_time_sleeps_remaining_period() {
        let start = Instant::now();
        let now = start + Duration::from_millis(4);
        let (sleep, next) = schedule(now, start, PERIOD);
        assert_eq!(next, start + PERIOD);
        assert_eq!(sleep, Duration::from_millis(12));
    }

    #[test]
    fn test_slightly_late_does_not_sleep_or_drift() {
        let start = Instant::now();
        let now = start + Duration::from_millis(20);
        let (sleep, next) = schedule(now, start, PERIOD);
        assert_eq!(sleep, Duration::ZERO);
        assert_eq!(next, start + PERIOD);
    }

    #[test]
    fn test_far_behind_resynchronises() {
        let start = Instant::now();
        let now = start + PERIOD * 10;
        let (sleep, next) = schedule(now, start, PERIOD);
        assert_eq!(sleep, Duration::ZERO);
        assert_eq!(next, now + PERIOD);
    }

    #[test]
    fn test_unpaced_wait_returns_immediately() {
        let mut pacer = FramePacer::new(0);
        assert!(pacer.frame_period().is_none());
        let before = Instant::now();
        pacer.wait();
        assert!(before.elapsed() < Duration::from_millis(50));
    }
}
