//! Elapsed time between animation frames

/// Turns animation-frame timestamps into per-frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp (ms) and return the time since the previous one
    ///
    /// The first frame after construction or [`reset`](Self::reset) only
    /// records its timestamp and returns `None`. A timestamp earlier than the
    /// previous one yields a zero delta.
    pub fn advance(&mut self, now: f64) -> Option<f64> {
        let dt = self.last_time.map(|last| (now - last).max(0.0));
        self.last_time = Some(now);
        dt
    }

    pub fn reset(&mut self) {
        self.last_time = None;
    }
}
