use embassy_time::{Duration, Instant};

use crate::{
    config::{LONG_PRESS, MEDIUM_PRESS},
    domain::entity::ButtonEvent,
};

/// Turns polled button levels into press events.
///
/// Only consecutive-poll edges are considered, there is no debounce.
#[derive(Debug, Default)]
pub struct ButtonClassifier {
    /// Set between a rising and the next falling edge
    pressed_at: Option<Instant>,
}

impl ButtonClassifier {
    pub const fn new() -> Self {
        Self { pressed_at: None }
    }

    /// Feed one poll of the button level.
    ///
    /// Returns an event on release.
    pub fn poll(&mut self, pressed: bool, now: Instant) -> Option<ButtonEvent> {
        match (self.pressed_at, pressed) {
            (None, true) => {
                self.pressed_at = Some(now);
                None
            }
            (Some(started), false) => {
                self.pressed_at = None;
                Some(classify(now.saturating_duration_since(started)))
            }
            _ => None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }
}

/// Classify a completed press by how long it was held
pub fn classify(held: Duration) -> ButtonEvent {
    if held >= LONG_PRESS {
        ButtonEvent::LongPress
    } else if held >= MEDIUM_PRESS {
        ButtonEvent::MediumPress
    } else {
        ButtonEvent::ShortPress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(ms: u64) -> Option<ButtonEvent> {
        let mut button = ButtonClassifier::new();
        assert_eq!(button.poll(true, Instant::from_millis(100)), None);
        button.poll(false, Instant::from_millis(100 + ms))
    }

    #[test]
    fn thresholds() {
        assert_eq!(press(0), Some(ButtonEvent::ShortPress));
        assert_eq!(press(999), Some(ButtonEvent::ShortPress));
        assert_eq!(press(1000), Some(ButtonEvent::MediumPress));
        assert_eq!(press(1001), Some(ButtonEvent::MediumPress));
        assert_eq!(press(4999), Some(ButtonEvent::MediumPress));
        assert_eq!(press(5000), Some(ButtonEvent::LongPress));
        assert_eq!(press(5001), Some(ButtonEvent::LongPress));
    }

    #[test]
    fn steady_levels_emit_nothing() {
        let mut button = ButtonClassifier::new();
        assert_eq!(button.poll(false, Instant::from_millis(0)), None);
        assert_eq!(button.poll(true, Instant::from_millis(10)), None);
        assert_eq!(button.poll(true, Instant::from_millis(2000)), None);
        assert!(button.is_pressed());
        assert_eq!(
            button.poll(false, Instant::from_millis(2010)),
            Some(ButtonEvent::MediumPress)
        );
        assert!(!button.is_pressed());
        assert_eq!(button.poll(false, Instant::from_millis(9000)), None);
    }
}
