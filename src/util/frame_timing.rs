use web_time::{Duration, Instant};

/// Smoothed frame-rate tracker with a periodic report.
pub struct FrameTiming {
    last_frame: Instant,
    last_report: Instant,
    report_interval: Duration,
    /// Exponential moving average of the instantaneous rate.
    smoothed_fps: f32,
    /// Weight of each new sample (lower = smoother).
    smoothing: f32,
}

impl FrameTiming {
    /// Tracker that reports at most once per `report_interval`.
    #[must_use]
    pub fn new(report_interval: Duration) -> Self {
        Self::starting_at(Instant::now(), report_interval)
    }

    fn starting_at(now: Instant, report_interval: Duration) -> Self {
        Self {
            last_frame: now,
            last_report: now,
            report_interval,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Record a presented frame. Returns the smoothed rate when a report
    /// is due.
    pub fn end_frame(&mut self) -> Option<f32> {
        self.end_frame_at(Instant::now())
    }

    fn end_frame_at(&mut self, now: Instant) -> Option<f32> {
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        if frame_time > 0.0 {
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + self.smoothing / frame_time;
        }

        if now.duration_since(self.last_report) >= self.report_interval {
            self.last_report = now;
            Some(self.smoothed_fps)
        } else {
            None
        }
    }

    /// Restart the frame clock after a pause so the gap is not sampled.
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
    }

    /// Current smoothed frame rate.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_to_steady_rate() {
        let start = Instant::now();
        let mut timing = FrameTiming::starting_at(start, Duration::from_secs(60));
        let step = Duration::from_millis(10);
        for i in 1..=400 {
            let _ = timing.end_frame_at(start + step * i);
        }
        assert!((timing.fps() - 100.0).abs() < 1.0, "fps {}", timing.fps());
    }

    #[test]
    fn reports_once_per_interval() {
        let start = Instant::now();
        let mut timing = FrameTiming::starting_at(start, Duration::from_secs(1));
        let step = Duration::from_millis(250);
        let reports = (1..=8)
            .filter_map(|i| timing.end_frame_at(start + step * i))
            .count();
        assert_eq!(reports, 2);
    }
}
