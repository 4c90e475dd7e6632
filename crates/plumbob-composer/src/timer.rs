//! "Every N milliseconds" virtual timers
//!
//! Each mode owns one timer so that its phase is independent of every
//! other mode. A timer arms on its first evaluation and fires once at
//! least `period` has elapsed since it last fired.

use embassy_time::{Duration, Instant};

use crate::mode::ModeId;

/// Single rate limiter keyed off "time since last fire".
#[derive(Clone, Copy, Debug, Default)]
pub struct IntervalTimer {
    last_fired: Option<Instant>,
}

impl IntervalTimer {
    pub const fn new() -> Self {
        Self { last_fired: None }
    }

    /// Restart the phase so the next fire is one full period after `now`.
    pub fn restart(&mut self, now: Instant) {
        self.last_fired = Some(now);
    }

    /// Returns `true` (and restarts the phase) when `period` has elapsed.
    pub fn ready(&mut self, now: Instant, period: Duration) -> bool {
        let Some(last) = self.last_fired else {
            self.last_fired = Some(now);
            return period.as_ticks() == 0;
        };

        if now.saturating_duration_since(last) >= period {
            self.last_fired = Some(now);
            true
        } else {
            false
        }
    }
}

/// Per-mode timer table
#[derive(Clone, Debug, Default)]
pub struct ModeTimers {
    timers: [IntervalTimer; ModeId::COUNT],
}

impl ModeTimers {
    pub const fn new() -> Self {
        Self {
            timers: [IntervalTimer::new(); ModeId::COUNT],
        }
    }

    pub fn get_mut(&mut self, mode: ModeId) -> &mut IntervalTimer {
        &mut self.timers[mode.index()]
    }

    /// Shorthand for `get_mut(mode).ready(now, period)`
    pub fn ready(&mut self, mode: ModeId, now: Instant, period: Duration) -> bool {
        self.get_mut(mode).ready(now, period)
    }
}
