//! Browser scheduler backed by `requestAnimationFrame` and `setInterval`

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::{FrameHandle, IntervalHandle, Scheduler};

/// Owns the JS callbacks so they live as long as the session that uses them
pub struct WebScheduler {
    window: Window,
    on_frame: Option<Closure<dyn FnMut(f64)>>,
    on_interval: Option<Closure<dyn FnMut()>>,
}

impl WebScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            on_frame: None,
            on_interval: None,
        }
    }

    /// Install the callbacks. Registrations before this are refused.
    pub fn bind(&mut self, on_frame: Closure<dyn FnMut(f64)>, on_interval: Closure<dyn FnMut()>) {
        self.on_frame = Some(on_frame);
        self.on_interval = Some(on_interval);
    }
}

impl Scheduler for WebScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let callback = self.on_frame.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }

    fn start_interval(&mut self, period_ms: u32) -> Option<IntervalHandle> {
        let callback = self.on_interval.as_ref()?;
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                period_ms as i32,
            ) {
            Ok(id) => Some(IntervalHandle(id)),
            Err(e) => {
                log::warn!("setInterval failed: {:?}", e);
                None
            }
        }
    }

    fn clear_interval(&mut self, handle: IntervalHandle) {
        self.window.clear_interval_with_handle(handle.0);
    }
}
