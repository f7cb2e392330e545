//! Rolling frame-rate tracking.

use std::time::Instant;

/// FPS is recomputed once every this many frames.
pub const REPORT_INTERVAL: u64 = 10;

/// Rolling FPS tracker.
///
/// Counts frames and, on every [`REPORT_INTERVAL`]th frame, computes the
/// instantaneous rate from wall-clock time elapsed since the previous
/// recomputation, then resets the baseline. State is explicit so the
/// computation can be tested with injected timestamps.
#[derive(Debug)]
pub struct FpsTracker {
    frames: u64,
    baseline: Instant,
    last_fps: Option<f32>,
}

impl FpsTracker {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(baseline: Instant) -> Self {
        Self {
            frames: 0,
            baseline,
            last_fps: None,
        }
    }

    /// Count one frame; returns the fresh FPS value on report frames only.
    pub fn tick(&mut self) -> Option<f32> {
        self.tick_at(Instant::now())
    }

    /// Timestamp-injecting variant of [`tick`](Self::tick).
    pub fn tick_at(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        if self.frames % REPORT_INTERVAL != 0 {
            return None;
        }
        let elapsed = now.duration_since(self.baseline).as_secs_f32();
        self.baseline = now;
        if elapsed <= 0.0 {
            return None;
        }
        let fps = REPORT_INTERVAL as f32 / elapsed;
        self.last_fps = Some(fps);
        Some(fps)
    }

    /// Total frames counted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Most recently computed FPS value, if any.
    pub fn last_fps(&self) -> Option<f32> {
        self.last_fps
    }
}

impl Default for FpsTracker {
    fn default() -> Self {
        Self::new()
    }
}
