//! Headless surface that records the last frame's draw calls

use super::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Fill(String),
    Font(String),
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Text { text: String, x: f64, y: f64 },
}

#[derive(Debug, Default)]
pub struct Recorder {
    /// Calls since the last clear
    pub calls: Vec<DrawCall>,
    /// Number of clears seen (one per drawn frame)
    pub frames: u64,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rects(&self) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
        self.calls.iter().filter_map(|c| match *c {
            DrawCall::Rect { x, y, width, height } => Some((x, y, width, height)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn clear(&mut self, _width: f64, _height: f64) {
        self.calls.clear();
        self.calls.push(DrawCall::Clear);
        self.frames += 1;
    }

    fn save(&mut self) {
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        self.calls.push(DrawCall::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.calls.push(DrawCall::Translate { x, y });
    }

    fn set_fill(&mut self, color: &str) {
        self.calls.push(DrawCall::Fill(color.to_string()));
    }

    fn set_font(&mut self, font: &str) {
        self.calls.push(DrawCall::Font(font.to_string()));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::Rect { x, y, width, height });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
        });
    }
}
