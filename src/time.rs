//! Tick timing for the optional observer side channel.
//!
//! The effect itself keeps fixed wall-clock cadence and never adapts to
//! measured time; this module only reports what each tick cost.

use std::time::{Duration, Instant};

/// Timing snapshot handed to a tick observer after every tick.
#[derive(Debug, Clone, Copy)]
pub struct TickStats {
    /// Ticks completed since the effect started, starting at 1.
    pub frame: u64,
    /// How long the just-finished tick took to simulate and rasterize.
    pub tick_duration: Duration,
    /// Ticks-per-second estimate, refreshed every 500 ms.
    pub fps: f32,
}

/// Tracks tick counts and rates.
#[derive(Debug)]
pub struct TickTimer {
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl TickTimer {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: Instant::now(),
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Record one finished tick and produce its stats.
    ///
    /// `tick_duration` is the measured cost of the tick body, not the
    /// interval between ticks.
    pub fn record(&mut self, tick_duration: Duration) -> TickStats {
        self.frame_count += 1;

        let now = Instant::now();
        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        TickStats {
            frame: self.frame_count,
            tick_duration,
            fps: self.fps,
        }
    }

    /// Total ticks recorded so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recent ticks-per-second estimate.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_frames() {
        let mut timer = TickTimer::new();
        assert_eq!(timer.frame(), 0);

        let first = timer.record(Duration::from_millis(2));
        let second = timer.record(Duration::from_millis(3));

        assert_eq!(first.frame, 1);
        assert_eq!(second.frame, 2);
        assert_eq!(timer.frame(), 2);
    }

    #[test]
    fn test_record_passes_duration_through() {
        let mut timer = TickTimer::new();
        let stats = timer.record(Duration::from_micros(1234));
        assert_eq!(stats.tick_duration, Duration::from_micros(1234));
    }
}
