//! Periodic logging of composed body positions.

use orrery_scene::EcsScene;
use orrery_sim::FrameReport;
use tracing::{debug, info};

/// Logs world positions every `every` frames (0 = never).
#[derive(Clone, Copy, Debug)]
pub struct TraceReporter {
    every: u64,
}

impl TraceReporter {
    pub fn new(every: u64) -> Self {
        Self { every }
    }

    pub fn is_due(&self, frame: u64) -> bool {
        self.every > 0 && frame % self.every == 0
    }

    /// Logs the frame if it is due. Returns whether it logged.
    pub fn report(&self, frame: &FrameReport, scene: &EcsScene) -> bool {
        if !self.is_due(frame.frame) {
            return false;
        }

        info!(
            frame = frame.frame,
            "Frame at {:.3}s, delta {:.2}ms",
            frame.elapsed,
            frame.delta * 1000.0
        );
        for path in scene.paths() {
            if let Some(p) = scene.global_translation(path) {
                debug!(
                    body = %path,
                    "({:>8.3}, {:>8.3}, {:>8.3})",
                    p.x, p.y, p.z
                );
            }
        }
        true
    }
}
