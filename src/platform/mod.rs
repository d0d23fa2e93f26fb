//! Platform abstraction layer
//!
//! The session consumes two host primitives:
//! - a frame-presentation callback (register/cancel "run before next repaint")
//! - a real-time interval (register/cancel "run every N milliseconds")
//!
//! The callbacks themselves are bound by the host; the session only decides
//! when they are registered and cancelled.

pub mod manual;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use manual::ManualScheduler;
#[cfg(target_arch = "wasm32")]
pub use web::WebScheduler;

/// Outstanding frame callback registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Outstanding interval registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalHandle(pub i32);

/// Host scheduling contract
pub trait Scheduler {
    /// Register the frame callback for the next repaint.
    /// `None` if the host refused the registration.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Register the interval callback every `period_ms`
    fn start_interval(&mut self, period_ms: u32) -> Option<IntervalHandle>;

    fn clear_interval(&mut self, handle: IntervalHandle);
}
