use crate::providers::timetable::{Departure, Timetable};
use crate::state::DisplayMode;

/// Vertical gap between two text lines, in pixels.
const LINE_GUTTER: i32 = 4;

/// How many upcoming departures the small secondary line shows after the
/// soonest one.
const SECONDARY_DEPARTURES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    /// 6x12, primary trip lines and free text.
    Large,
    /// 5x8, secondary departure listings.
    Small,
}

/// Palette entry. `Late` is declared for red highlighting but nothing
/// selects it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Default,
    Late,
}

/// Font baselines as reported by the display device, used for vertical
/// layout.
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    pub large_baseline: i32,
    pub small_baseline: i32,
}

impl FontMetrics {
    pub fn baseline(&self, font: FontKind) -> i32 {
        match font {
            FontKind::Large => self.large_baseline,
            FontKind::Small => self.small_baseline,
        }
    }
}

/// One positioned, styled line of text for the render loop to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub y: i32,
    pub font: FontKind,
    pub color: TextColor,
    pub text: String,
}

struct FrameBuilder<'a> {
    metrics: &'a FontMetrics,
    lines: Vec<TextLine>,
    next_y: i32,
}

impl<'a> FrameBuilder<'a> {
    fn new(metrics: &'a FontMetrics) -> Self {
        Self {
            metrics,
            lines: Vec::new(),
            next_y: 0,
        }
    }

    fn push(&mut self, font: FontKind, color: TextColor, text: String) {
        let baseline = self.metrics.baseline(font);
        // The first line sits on its own font's baseline; every later line
        // advances by the previous line's baseline plus the gutter.
        let y = if self.lines.is_empty() {
            baseline
        } else {
            self.next_y
        };
        self.lines.push(TextLine {
            y,
            font,
            color,
            text,
        });
        self.next_y = y + baseline + LINE_GUTTER;
    }

    fn finish(self) -> Vec<TextLine> {
        self.lines
    }
}

/// One-character live-status glyph for a departure. Traffic jam wins over
/// late, late over plain real-time tracking.
fn indicator(departure: &Departure) -> &'static str {
    if departure.traffic_jam {
        "t"
    } else if departure.late {
        "."
    } else if departure.real_time {
        "\""
    } else {
        ""
    }
}

/// Countdown for the primary line: "*" means departing now.
fn primary_countdown(countdown: i32) -> String {
    if countdown == 0 {
        "*".to_string()
    } else {
        countdown.to_string()
    }
}

/// Pure layout: maps the current mode, free text, and timetable snapshot to
/// an ordered list of render instructions. Identical inputs always produce
/// identical output.
pub fn layout_frame(
    mode: DisplayMode,
    text: Option<&str>,
    timetable: Option<&Timetable>,
    metrics: &FontMetrics,
) -> Vec<TextLine> {
    let mut frame = FrameBuilder::new(metrics);

    match mode {
        DisplayMode::FreeText => layout_free_text(&mut frame, text),
        DisplayMode::Unconfigured | DisplayMode::Departures => {
            layout_departures(&mut frame, timetable)
        }
    }

    frame.finish()
}

fn layout_departures(frame: &mut FrameBuilder<'_>, timetable: Option<&Timetable>) {
    let Some(timetable) = timetable else {
        frame.push(
            FontKind::Large,
            TextColor::Default,
            "No timetable available".to_string(),
        );
        return;
    };

    for trip in &timetable.trips {
        let Some(first) = trip.departures.first() else {
            frame.push(
                FontKind::Large,
                TextColor::Default,
                format!("{:<3} {:<13} {:>3}", trip.line, trip.direction, "N/A"),
            );
            continue;
        };

        let slot = format!("{}{}", indicator(first), primary_countdown(first.countdown));
        frame.push(
            FontKind::Large,
            TextColor::Default,
            format!("{:<3} {:<13} {:>3}", trip.line, trip.direction, slot),
        );

        if trip.departures.len() > 1 {
            let upcoming: Vec<String> = trip
                .departures
                .iter()
                .skip(1)
                .take(SECONDARY_DEPARTURES)
                .map(|d| format!("{}{}", indicator(d), d.countdown))
                .collect();
            frame.push(
                FontKind::Small,
                TextColor::Default,
                format!("{:>25}", upcoming.join(", ")),
            );
        }
    }
}

fn layout_free_text(frame: &mut FrameBuilder<'_>, text: Option<&str>) {
    match text {
        Some(text) => frame.push(FontKind::Large, TextColor::Default, text.to_string()),
        None => {
            for help in [
                "Free text mode",
                "No text set yet.",
                "POST {\"text\": \"...\"}",
                "to /text on port 8080",
                "to show a message here.",
            ] {
                frame.push(FontKind::Small, TextColor::Default, help.to_string());
            }
        }
    }
}
