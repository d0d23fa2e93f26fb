//! `Surface` for a browser 2D canvas context

use web_sys::CanvasRenderingContext2d;

use super::Surface;

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, x: f64, y: f64) {
        if let Err(e) = CanvasRenderingContext2d::translate(self, x, y) {
            log::warn!("Canvas translate failed: {:?}", e);
        }
    }

    fn set_fill(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_font(&mut self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        if let Err(e) = CanvasRenderingContext2d::fill_text(self, text, x, y) {
            log::warn!("Canvas fill_text failed: {:?}", e);
        }
    }
}
