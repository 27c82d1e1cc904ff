use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::providers::timetable::Timetable;

/// What the render loop should draw.
///
/// `Unconfigured` is the explicit startup default so that "never set" and
/// "deliberately set to Departures" stay distinguishable; it renders the
/// departures view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Unconfigured,
    Departures,
    FreeText,
}

impl DisplayMode {
    /// Control-plane wire code (0 = Departures, 1 = FreeText).
    pub fn from_wire(code: i32) -> Option<Self> {
        match code {
            0 => Some(DisplayMode::Departures),
            1 => Some(DisplayMode::FreeText),
            _ => None,
        }
    }

    /// The effective wire code; Unconfigured reports the departures view.
    pub fn wire_code(self) -> i32 {
        match self {
            DisplayMode::Unconfigured | DisplayMode::Departures => 0,
            DisplayMode::FreeText => 1,
        }
    }

    fn from_repr(repr: u8) -> Self {
        match repr {
            1 => DisplayMode::Departures,
            2 => DisplayMode::FreeText,
            _ => DisplayMode::Unconfigured,
        }
    }

    fn repr(self) -> u8 {
        match self {
            DisplayMode::Unconfigured => 0,
            DisplayMode::Departures => 1,
            DisplayMode::FreeText => 2,
        }
    }
}

/// Runtime state shared between the poller, the control plane, and the
/// render loop.
///
/// Each field has exactly one writer (the poller for the timetable and fetch
/// timestamp, the control plane for everything else) and every publish is a
/// whole-value replacement: scalars are atomics, richer values are `Arc`
/// snapshots swapped under a lock that is only ever held for the swap
/// itself. Readers get the last fully published value and never a partially
/// written one.
pub struct SharedState {
    brightness: AtomicU8,
    mode: AtomicU8,
    text: RwLock<Option<Arc<str>>>,
    timetable: RwLock<Option<Arc<Timetable>>>,
    last_fetch: RwLock<Option<DateTime<Utc>>>,
}

pub type StateHandle = Arc<SharedState>;

impl SharedState {
    pub fn new(brightness: u8) -> Self {
        Self {
            brightness: AtomicU8::new(brightness),
            mode: AtomicU8::new(DisplayMode::default().repr()),
            text: RwLock::new(None),
            timetable: RwLock::new(None),
            last_fetch: RwLock::new(None),
        }
    }

    pub fn brightness(&self) -> u8 {
        self.brightness.load(Ordering::Relaxed)
    }

    /// Store a new brightness. Range validation (0-100) happens at the
    /// control-plane boundary; the stored value is always valid.
    pub fn set_brightness(&self, brightness: u8) {
        self.brightness.store(brightness, Ordering::Relaxed);
    }

    pub fn mode(&self) -> DisplayMode {
        DisplayMode::from_repr(self.mode.load(Ordering::Relaxed))
    }

    pub fn set_mode(&self, mode: DisplayMode) {
        self.mode.store(mode.repr(), Ordering::Relaxed);
    }

    pub fn text(&self) -> Option<Arc<str>> {
        self.text
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_text(&self, text: String) {
        let snapshot: Arc<str> = text.into();
        *self.text.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }

    pub fn timetable(&self) -> Option<Arc<Timetable>> {
        self.timetable
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the published timetable snapshot and record the fetch time.
    /// The previous snapshot stays alive for any reader still holding it.
    pub fn publish_timetable(&self, timetable: Timetable) {
        let snapshot = Arc::new(timetable);
        *self
            .timetable
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
        *self
            .last_fetch
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Utc::now());
    }

    pub fn last_fetch(&self) -> Option<DateTime<Utc>> {
        *self
            .last_fetch
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::timetable::Trip;

    fn timetable_with_line(line: &str) -> Timetable {
        Timetable {
            trips: vec![Trip {
                line: line.to_string(),
                direction: "Main Station".to_string(),
                foot_minutes_to_station: 5,
                departures: Vec::new(),
            }],
            message: None,
        }
    }

    #[test]
    fn starts_with_defaults() {
        let state = SharedState::new(80);
        assert_eq!(state.brightness(), 80);
        assert_eq!(state.mode(), DisplayMode::Unconfigured);
        assert_eq!(state.text(), None);
        assert!(state.timetable().is_none());
        assert!(state.last_fetch().is_none());
    }

    #[test]
    fn publishes_replace_whole_values() {
        let state = SharedState::new(80);

        state.set_brightness(42);
        assert_eq!(state.brightness(), 42);

        state.set_mode(DisplayMode::FreeText);
        assert_eq!(state.mode(), DisplayMode::FreeText);

        state.set_text("hello".to_string());
        state.set_text("world".to_string());
        assert_eq!(state.text().as_deref(), Some("world"));
    }

    #[test]
    fn timetable_snapshot_is_replaced_wholesale() {
        let state = SharedState::new(80);

        state.publish_timetable(timetable_with_line("U1"));
        let first = state.timetable().unwrap();
        assert_eq!(first.trips[0].line, "U1");

        state.publish_timetable(timetable_with_line("U2"));
        assert_eq!(state.timetable().unwrap().trips[0].line, "U2");

        // A reader holding the old snapshot still sees it unchanged.
        assert_eq!(first.trips[0].line, "U1");
        assert!(state.last_fetch().is_some());
    }

    #[test]
    fn mode_wire_codes_round_trip() {
        assert_eq!(DisplayMode::from_wire(0), Some(DisplayMode::Departures));
        assert_eq!(DisplayMode::from_wire(1), Some(DisplayMode::FreeText));
        assert_eq!(DisplayMode::from_wire(2), None);
        assert_eq!(DisplayMode::from_wire(-1), None);

        // Unconfigured reports the departures view.
        assert_eq!(DisplayMode::Unconfigured.wire_code(), 0);
        assert_eq!(DisplayMode::FreeText.wire_code(), 1);
    }

    #[test]
    fn concurrent_writers_to_different_fields_never_corrupt_either() {
        let state = Arc::new(SharedState::new(80));

        let brightness_state = state.clone();
        let brightness_writer = std::thread::spawn(move || {
            for value in 0..=100u8 {
                brightness_state.set_brightness(value);
            }
            brightness_state.set_brightness(42);
        });

        let text_state = state.clone();
        let text_writer = std::thread::spawn(move || {
            for i in 0..500 {
                text_state.set_text(format!("message {}", i));
            }
            text_state.set_text("final message".to_string());
        });

        brightness_writer.join().unwrap();
        text_writer.join().unwrap();

        assert_eq!(state.brightness(), 42);
        assert_eq!(state.text().as_deref(), Some("final message"));
    }
}
