//! Shared utilities

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// FPS counter with rolling average
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    last_report: Instant,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a new FPS counter with specified sample window
    pub fn new(sample_count: usize) -> Self {
        let now = Instant::now();
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: now,
            last_report: now,
            sample_count: sample_count.max(1),
        }
    }

    /// Call once per frame. Returns the frame's delta time in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(dt);
        dt
    }

    fn record(&mut self, dt: f32) {
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }
    }

    /// Average FPS over the sample window
    pub fn avg_fps(&self) -> f32 {
        let avg_dt = self.avg_frame_time_ms() / 1000.0;
        if avg_dt > 0.0 {
            1.0 / avg_dt
        } else {
            0.0
        }
    }

    /// Get the average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        let avg_dt: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        avg_dt * 1000.0
    }

    /// Get min/max FPS from sample window
    pub fn min_max_fps(&self) -> (f32, f32) {
        if self.frame_times.is_empty() {
            return (0.0, 0.0);
        }
        let min_dt = self
            .frame_times
            .iter()
            .cloned()
            .fold(f32::INFINITY, f32::min);
        let max_dt = self.frame_times.iter().cloned().fold(0.0, f32::max);
        let max_fps = if min_dt > 0.0 { 1.0 / min_dt } else { 0.0 };
        let min_fps = if max_dt > 0.0 { 1.0 / max_dt } else { 0.0 };
        (min_fps, max_fps)
    }

    /// True at most once per `interval`; used to throttle FPS logging
    pub fn report_due(&mut self, interval: Duration) -> bool {
        if self.last_report.elapsed() >= interval {
            self.last_report = Instant::now();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_counter() {
        let counter = FpsCounter::new(10);
        assert_eq!(counter.avg_fps(), 0.0);
        assert_eq!(counter.min_max_fps(), (0.0, 0.0));
    }

    #[test]
    fn test_rolling_window() {
        let mut counter = FpsCounter::new(2);
        counter.record(1.0);
        counter.record(0.5);
        counter.record(0.25);
        // Oldest sample dropped: avg of 0.5 and 0.25
        assert!((counter.avg_frame_time_ms() - 375.0).abs() < 0.01);
        let (min_fps, max_fps) = counter.min_max_fps();
        assert!((min_fps - 2.0).abs() < 0.001);
        assert!((max_fps - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_report_throttled() {
        let mut counter = FpsCounter::new(4);
        assert!(!counter.report_due(Duration::from_secs(3600)));
        assert!(counter.report_due(Duration::ZERO));
    }
}
