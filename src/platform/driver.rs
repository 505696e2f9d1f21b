//! Animation-frame driver
//!
//! Owns the start/stop lifecycle of the frame loop. Each frame re-arms the
//! next one before stepping the game, and stopping cancels whatever callback
//! is still pending, so no frame runs after `stop`.

use super::time::FrameClock;

/// Something that can book one callback for the next frame
pub trait FrameScheduler {
    type Handle;

    /// Request the next frame; `None` if the platform refused
    fn schedule(&mut self) -> Option<Self::Handle>;

    /// Cancel a previously requested frame
    fn cancel(&mut self, handle: Self::Handle);
}

/// Frame loop state machine over a [`FrameScheduler`]
pub struct Driver<S: FrameScheduler> {
    scheduler: S,
    clock: FrameClock,
    pending: Option<S::Handle>,
    running: bool,
}

impl<S: FrameScheduler> Driver<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            clock: FrameClock::new(),
            pending: None,
            running: false,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Arm the first frame. No-op if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.clock.reset();
        self.pending = self.scheduler.schedule();
        if self.pending.is_none() {
            log::warn!("Frame scheduler refused the first frame");
        }
        log::debug!("Frame driver started");
    }

    /// Stop the loop and cancel the pending frame
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        log::debug!("Frame driver stopped");
    }

    /// Handle a frame callback at timestamp `now` (ms)
    ///
    /// `step` receives the elapsed milliseconds since the previous frame. It
    /// is not called on the first frame after `start`, nor after `stop`.
    /// Returns true if `step` ran.
    pub fn on_frame(&mut self, now: f64, step: impl FnOnce(f32)) -> bool {
        if !self.running {
            return false;
        }
        // Re-arm first so the loop survives whatever the step does
        self.pending = self.scheduler.schedule();
        if self.pending.is_none() {
            log::warn!("Frame scheduler refused the next frame");
        }
        match self.clock.advance(now) {
            Some(dt) => {
                step(dt as f32);
                true
            }
            None => false,
        }
    }
}

impl<S: FrameScheduler> Drop for Driver<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Scheduler that only records requests; frames are delivered by calling
/// [`Driver::on_frame`] directly. Used by the headless runner and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u32,
    armed: Option<u32>,
    cancelled: Vec<u32>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle of the frame currently booked, if any
    pub fn armed(&self) -> Option<u32> {
        self.armed
    }

    pub fn cancelled(&self) -> &[u32] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u32;

    fn schedule(&mut self) -> Option<u32> {
        self.next_handle += 1;
        self.armed = Some(self.next_handle);
        self.armed
    }

    fn cancel(&mut self, handle: u32) {
        if self.armed == Some(handle) {
            self.armed = None;
        }
        self.cancelled.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_only_initializes() {
        let mut driver = Driver::new(ManualScheduler::new());
        driver.start();
        let mut steps = Vec::new();
        assert!(!driver.on_frame(1000.0, |dt| steps.push(dt)));
        assert!(driver.on_frame(1016.0, |dt| steps.push(dt)));
        assert!(driver.on_frame(1048.0, |dt| steps.push(dt)));
        assert_eq!(steps, vec![16.0, 32.0]);
    }

    #[test]
    fn test_every_frame_rearms() {
        let mut driver = Driver::new(ManualScheduler::new());
        driver.start();
        assert_eq!(driver.scheduler().armed(), Some(1));
        driver.on_frame(0.0, |_| {});
        assert_eq!(driver.scheduler().armed(), Some(2));
        driver.on_frame(16.0, |_| {});
        assert_eq!(driver.scheduler().armed(), Some(3));
    }

    #[test]
    fn test_stop_cancels_pending_and_ignores_late_frames() {
        let mut driver = Driver::new(ManualScheduler::new());
        driver.start();
        driver.on_frame(0.0, |_| {});
        driver.stop();
        assert!(!driver.is_running());
        assert_eq!(driver.scheduler().armed(), None);
        assert_eq!(driver.scheduler().cancelled(), &[2]);

        // A callback that was already in flight must not step
        let mut stepped = false;
        assert!(!driver.on_frame(16.0, |_| stepped = true));
        assert!(!stepped);
        assert_eq!(driver.scheduler().armed(), None);
    }

    #[test]
    fn test_restart_skips_gap() {
        let mut driver = Driver::new(ManualScheduler::new());
        driver.start();
        driver.on_frame(0.0, |_| {});
        driver.stop();
        driver.start();
        let mut steps = Vec::new();
        // Time spent stopped is not fed to the game
        assert!(!driver.on_frame(60_000.0, |dt| steps.push(dt)));
        driver.on_frame(60_010.0, |dt| steps.push(dt));
        assert_eq!(steps, vec![10.0]);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut driver = Driver::new(ManualScheduler::new());
        driver.start();
        driver.start();
        assert_eq!(driver.scheduler().armed(), Some(1));
    }
}
