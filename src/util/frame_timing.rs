//! Frame pacing for host-driven tick loops.

use web_time::{Duration, Instant};

/// Weight of the newest sample in the smoothed FPS average.
const FPS_SMOOTHING: f32 = 0.05;

/// Frame pacing for hosts that drive a [`FrameEngine`] from their own loop.
///
/// [`FrameEngine`]: crate::animation::FrameEngine
#[derive(Debug)]
pub struct FrameTiming {
    /// Minimum time between frames, `None` when unlimited.
    interval: Option<Duration>,
    last_frame: Instant,
    /// Exponential moving average of the frame rate.
    smoothed_fps: f32,
    frames: u64,
}

impl FrameTiming {
    /// Pace frames at `target_fps` (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self {
            interval: (target_fps > 0)
                .then(|| Duration::from_secs_f64(1.0 / f64::from(target_fps))),
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            frames: 0,
        }
    }

    /// Whether enough time has passed since the last frame to tick again.
    #[must_use]
    pub fn should_tick(&self) -> bool {
        self.until_next_frame().is_zero()
    }

    /// Time left before the next frame is due (zero when already due).
    #[must_use]
    pub fn until_next_frame(&self) -> Duration {
        self.interval.map_or(Duration::ZERO, |interval| {
            interval.saturating_sub(self.last_frame.elapsed())
        })
    }

    /// Mark the end of a frame.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frames += 1;

        if secs > 0.0 {
            self.smoothed_fps = self
                .smoothed_fps
                .mul_add(1.0 - FPS_SMOOTHING, FPS_SMOOTHING / secs);
        }
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames ended so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_always_ticks() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_tick());
        assert_eq!(timing.until_next_frame(), Duration::ZERO);
    }

    #[test]
    fn test_limited_waits_for_interval() {
        let mut timing = FrameTiming::new(1);
        timing.end_frame();
        assert!(!timing.should_tick());
        assert!(timing.until_next_frame() > Duration::from_millis(500));
        assert_eq!(timing.frames(), 1);
    }
}
