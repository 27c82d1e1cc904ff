use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::layout::{layout_frame, TextColor};
use crate::panel::{Color, Panel};
use crate::state::StateHandle;

const BG_COLOR: Color = Color::new(0, 0, 0);
const FG_DEFAULT: Color = Color::new(100, 0, 255);
const FG_LATE: Color = Color::new(255, 0, 0);

fn palette(color: TextColor) -> Color {
    match color {
        TextColor::Default => FG_DEFAULT,
        TextColor::Late => FG_LATE,
    }
}

/// Draw and present one frame from the current shared state. Reads are
/// snapshots; a fetch or control update racing with this call can never
/// tear the frame.
pub fn render_frame(panel: &mut dyn Panel, state: &StateHandle) {
    let metrics = panel.font_metrics();

    panel.clear(BG_COLOR);
    panel.set_brightness(state.brightness());

    let timetable = state.timetable();
    let text = state.text();
    let lines = layout_frame(
        state.mode(),
        text.as_deref(),
        timetable.as_deref(),
        &metrics,
    );

    for line in &lines {
        panel.draw_text(0, line.y, line.font, palette(line.color), &line.text);
    }

    panel.present();
}

/// Render loop body for the dedicated display thread. Presents one frame
/// per tick until the shutdown flag drops; `present` itself may additionally
/// block on the device's refresh signal.
pub fn run(mut panel: Box<dyn Panel>, state: StateHandle, running: Arc<AtomicBool>, tick: Duration) {
    info!(tick_ms = tick.as_millis() as u64, "Render loop started");

    while running.load(Ordering::Relaxed) {
        render_frame(panel.as_mut(), &state);
        std::thread::sleep(tick);
    }

    info!("Render loop stopped");
}
