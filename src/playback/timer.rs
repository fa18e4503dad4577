use std::time::{Duration, Instant};

/// Host frame scheduler: blocks until the next frame and returns its
/// timestamp in milliseconds.
pub trait FrameTimer {
    fn next_frame_ms(&mut self) -> f64;
}

/// Synthetic timer producing evenly spaced timestamps without waiting.
#[derive(Clone, Debug)]
pub struct FixedRateTimer {
    fps: f64,
    frame: u64,
}

impl FixedRateTimer {
    /// `fps` must be positive; non-positive values fall back to 60.
    pub fn new(fps: f64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { 60.0 };
        Self { fps, frame: 0 }
    }
}

impl FrameTimer for FixedRateTimer {
    fn next_frame_ms(&mut self) -> f64 {
        let ts = (self.frame as f64) * 1000.0 / self.fps;
        self.frame += 1;
        ts
    }
}

/// Real-time timer pacing frames at a fixed interval.
#[derive(Clone, Debug)]
pub struct WallClockTimer {
    start: Instant,
    interval: Duration,
    next: Instant,
}

impl WallClockTimer {
    pub fn new(fps: f64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { 60.0 };
        let start = Instant::now();
        Self {
            start,
            interval: Duration::from_secs_f64(1.0 / fps),
            next: start,
        }
    }
}

impl FrameTimer for WallClockTimer {
    fn next_frame_ms(&mut self) -> f64 {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
        }
        self.next = self.next.max(now) + self.interval;
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}
