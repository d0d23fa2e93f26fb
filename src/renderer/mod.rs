//! Immediate-mode 2D rendering
//!
//! The frame is drawn through the `Surface` trait so the same pass targets a
//! browser canvas or a headless recorder.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod frame;
pub mod recorder;

pub use frame::{Palette, draw_frame, is_visible, visible_span};
pub use recorder::{DrawCall, Recorder};

/// Drawing primitives the frame pass needs (canvas 2D semantics)
pub trait Surface {
    /// Clear the whole drawable area
    fn clear(&mut self, width: f64, height: f64);
    /// Push the current transform
    fn save(&mut self);
    /// Pop back to the last saved transform
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn set_fill(&mut self, color: &str);
    fn set_font(&mut self, font: &str);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}
