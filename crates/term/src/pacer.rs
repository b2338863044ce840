//! Fixed-interval frame pacing.

/// Computes how long the render loop sleeps between frames.
///
/// Frames are scheduled on deadlines `interval` apart. A frame that overruns
/// its deadline gets no sleep, and the schedule restarts from that moment so a
/// slow frame never triggers a burst of catch-up frames.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval_ms: u64,
    deadline_ms: u64,
}

impl FramePacer {
    pub fn new(interval_ms: u64, start_ms: u64) -> Self {
        Self {
            interval_ms,
            deadline_ms: start_ms,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    /// Milliseconds to sleep after a frame that finished at `now_ms`.
    pub fn next_delay(&mut self, now_ms: u64) -> u64 {
        let deadline = self.deadline_ms.saturating_add(self.interval_ms);
        self.deadline_ms = deadline.max(now_ms);
        deadline.saturating_sub(now_ms)
    }
}
