use std::time::Duration;

const AVERAGING_WINDOW: Duration = Duration::from_secs(1);

/// Frame rate and frame time averaged over roughly the last second.
#[derive(Debug, Clone)]
pub struct FrameStats {
    pub frame_rate: f32,
    pub frame_time: f32,
    frame_count: u32,
    elapsed: Duration,
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            frame_rate: 60.0,
            frame_time: 1.0 / 60.0,
            frame_count: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Records one frame. Returns true when the averages were refreshed.
    pub fn record_frame(&mut self, delta: Duration) -> bool {
        self.frame_count += 1;
        self.elapsed += delta;

        if self.elapsed <= AVERAGING_WINDOW {
            return false;
        }

        self.frame_time = self.elapsed.as_secs_f32() / self.frame_count as f32;
        self.frame_rate = 1.0 / self.frame_time;
        self.frame_count = 0;
        self.elapsed = Duration::ZERO;

        true
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}
