use tracing::debug;

use crate::layout::{FontKind, FontMetrics};

use super::{Color, Panel, PanelError};

// Baselines of the 6x12 / 5x8 BDF fonts the hardware build ships with.
const LARGE_BASELINE: i32 = 10;
const SMALL_BASELINE: i32 = 7;

/// Software stand-in for the LED matrix: collects the drawn frame and logs
/// it on present. Lets the daemon run on machines without the hardware.
pub struct SimPanel {
    brightness: u8,
    frame: Vec<(i32, String)>,
}

impl SimPanel {
    pub fn new() -> Result<Self, PanelError> {
        Ok(Self {
            brightness: 0,
            frame: Vec::new(),
        })
    }
}

impl Panel for SimPanel {
    fn font_metrics(&self) -> FontMetrics {
        FontMetrics {
            large_baseline: LARGE_BASELINE,
            small_baseline: SMALL_BASELINE,
        }
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn clear(&mut self, _color: Color) {
        self.frame.clear();
    }

    fn draw_text(&mut self, _x: i32, y: i32, _font: FontKind, _color: Color, text: &str) {
        self.frame.push((y, text.to_string()));
    }

    fn present(&mut self) {
        debug!(brightness = self.brightness, lines = self.frame.len(), "Presenting frame");
        for (y, text) in &self.frame {
            debug!(y, text = text.as_str(), "Frame line");
        }
    }
}
