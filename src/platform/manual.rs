//! Headless scheduler driven by hand
//!
//! Records registrations instead of talking to a host. The native binary and
//! the tests fire callbacks explicitly through it.

use super::{FrameHandle, IntervalHandle, Scheduler};

#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    frame: Option<FrameHandle>,
    interval: Option<(IntervalHandle, u32)>,
    /// Total frame registrations, including cancelled ones
    pub frames_requested: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_pending(&self) -> bool {
        self.frame.is_some()
    }

    pub fn interval_active(&self) -> bool {
        self.interval.is_some()
    }

    pub fn interval_period_ms(&self) -> Option<u32> {
        self.interval.map(|(_, period)| period)
    }

    /// Consume the pending frame registration, as the host does when it
    /// invokes the callback. Returns false if nothing was pending.
    pub fn fire_frame(&mut self) -> bool {
        self.frame.take().is_some()
    }

    /// Whether an interval tick would be delivered now
    pub fn fire_interval(&self) -> bool {
        self.interval.is_some()
    }

    fn allocate(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let handle = FrameHandle(self.allocate());
        self.frame = Some(handle);
        self.frames_requested += 1;
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.frame == Some(handle) {
            self.frame = None;
        }
    }

    fn start_interval(&mut self, period_ms: u32) -> Option<IntervalHandle> {
        let handle = IntervalHandle(self.allocate());
        self.interval = Some((handle, period_ms));
        Some(handle)
    }

    fn clear_interval(&mut self, handle: IntervalHandle) {
        if self.interval.map(|(h, _)| h) == Some(handle) {
            self.interval = None;
        }
    }
}
