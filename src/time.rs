//! Frame clock.
//!
//! Tracks per-frame delta, frame count and FPS. Updates take an explicit
//! [`Instant`], so hosts with a synthetic clock (and tests) never have to
//! sleep.
//!
//! # Example
//!
//! ```ignore
//! use motes::time::Time;
//!
//! let mut time = Time::starting_at(Instant::now());
//!
//! // In your frame callback:
//! let delta = time.update_at(Instant::now());
//! let ticks = config.timing.ticks_for(delta);
//! ```

use std::time::{Duration, Instant};

/// Time tracking for the frame loop.
#[derive(Debug, Clone)]
pub struct Time {
    /// When the last frame occurred.
    last_frame: Instant,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
}

impl Time {
    /// Create a new clock starting at `now`.
    pub fn starting_at(now: Instant) -> Self {
        Self {
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Record a frame at `now`. Call once per frame.
    ///
    /// Returns the delta since the previous frame in seconds. A `now` earlier
    /// than the last frame counts as zero.
    pub fn update_at(&mut self, now: Instant) -> f32 {
        self.delta_secs = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.saturating_duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Time since last frame in seconds (delta time).
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}
