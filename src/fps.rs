use std::time::{
    Duration,
    Instant,
};

pub const FPS_WINDOW: Duration = Duration::from_millis(1000);

/// Counts refreshes and turns them into a rate once per rolling window,
/// using the measured window length rather than the nominal one.
#[derive(Clone, Debug)]
pub struct FrameRateSampler {
    window: Duration,
    window_start: Instant,
    frames: u32,
    rate: f64,
}

impl FrameRateSampler {
    pub fn new(now: Instant) -> Self {
        Self::with_window(now, FPS_WINDOW)
    }

    pub fn with_window(now: Instant, window: Duration) -> Self {
        FrameRateSampler {
            window,
            window_start: now,
            frames: 0,
            rate: 0.0,
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the fresh rate when this frame closes a window.
    pub fn record_frame(&mut self, now: Instant) -> Option<f64> {
        self.frames += 1;
        let delta = now.saturating_duration_since(self.window_start);
        if delta < self.window {
            return None;
        }
        self.rate = f64::from(self.frames) / delta.as_secs_f64();
        self.frames = 0;
        self.window_start = now;
        Some(self.rate)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;

    #[test]
    fn record_frame__reports_rate_once_window_elapses() {
        // given
        let start = Instant::now();
        let mut sut = FrameRateSampler::new(start);

        // when
        let mut reports = Vec::new();
        for i in 1..=60u64 {
            reports.push(sut.record_frame(start + Duration::from_micros(16_667 * i)));
        }

        // then
        let closed: Vec<f64> = reports.iter().flatten().copied().collect();
        assert_eq!(closed.len(), 1);
        assert!((closed[0] - 60.0).abs() < 0.01);
        assert_eq!(sut.rate(), closed[0]);
    }

    #[test]
    fn record_frame__uses_measured_window_length() {
        let start = Instant::now();
        let mut sut = FrameRateSampler::new(start);

        for _ in 0..9 {
            assert_eq!(sut.record_frame(start + Duration::from_millis(100)), None);
        }
        let rate = sut.record_frame(start + Duration::from_millis(2000));

        assert_eq!(rate, Some(5.0));
    }

    #[test]
    fn record_frame__starts_a_fresh_window_after_report() {
        let start = Instant::now();
        let mut sut = FrameRateSampler::with_window(start, Duration::from_millis(500));

        assert!(sut.record_frame(start + Duration::from_millis(500)).is_some());
        assert!(sut.record_frame(start + Duration::from_millis(600)).is_none());
        let rate = sut.record_frame(start + Duration::from_millis(1000));
        assert_eq!(rate, Some(4.0));
    }
}
