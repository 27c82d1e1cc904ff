pub mod sim;

use thiserror::Error;

use crate::layout::{FontKind, FontMetrics};

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("Failed to initialize display panel: {0}")]
    Init(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Capability surface of the pixel-matrix display.
///
/// Implementations own the off-screen buffer: drawing calls target it and
/// `present` swaps it onto the visible display. `present` may block until
/// the device's next refresh boundary, which is why the render loop runs on
/// its own thread.
pub trait Panel: Send {
    /// Baselines of the two fonts the device has loaded.
    fn font_metrics(&self) -> FontMetrics;

    /// Expects an already validated value in 0..=100.
    fn set_brightness(&mut self, brightness: u8);

    /// Fill the off-screen buffer with a solid color.
    fn clear(&mut self, color: Color);

    /// Draw one line of text into the off-screen buffer; `y` is the text
    /// baseline.
    fn draw_text(&mut self, x: i32, y: i32, font: FontKind, color: Color, text: &str);

    /// Atomically swap the off-screen buffer onto the display.
    fn present(&mut self);
}
