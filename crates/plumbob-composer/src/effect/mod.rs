//! Per-mode render functions and their tunables
//!
//! Effects are plain functions over the pixel buffer; the progress they
//! need between frames (hues, palette offset, heat map) lives in
//! [`crate::engine::AnimationState`], and their rate limiting in
//! [`crate::timer::ModeTimers`].

mod beat;
mod chase;
mod fire;
mod palette;
mod rainbow;
mod sparkle;
mod static_color;

pub use beat::{beat_color, beat_palette};
pub use chase::push_chase;
pub use fire::FireSimulation;
pub use palette::fill_spread;
pub use rainbow::{fill_rainbow, fill_solid_hue, rainbow_step};
pub use sparkle::sparkle;
pub use static_color::fill_solid;

use embassy_time::Duration;

use crate::color::Rgb;

/// Random single color chase (mode 3)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChaseParams {
    /// Hue of every new pixel; values above 255 saturate
    pub hue: u16,
    /// Milliseconds between pushes
    pub speed: u16,
}

/// Fade-to-black sparkle (mode 6)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SparkleParams {
    /// Milliseconds between new sparkles
    pub speed: u16,
    /// Fade step applied every frame
    pub fade: u16,
}

/// Beat-synced color (mode 7)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeatParams {
    pub bpm: u16,
    /// Fade step applied every frame
    pub fade: u16,
    pub color: Rgb,
}

/// Fire simulation (mode 9)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FireParams {
    /// Milliseconds between simulation steps
    pub speed: u16,
    /// How fast cells lose heat
    pub cooling: u16,
    /// Chance (out of 256) of a new spark per step
    pub sparks: u16,
    /// Draw the flame from the far end of the strip
    pub reverse: bool,
}

/// Every mode's tunable parameters.
///
/// Values are stored exactly as they are persisted; effects saturate
/// them to their working range at render time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectParams {
    pub full_rainbow_speed: u16,
    pub animated_rainbow_speed: u16,
    pub chase: ChaseParams,
    pub animated_palette_speed: u16,
    pub sparkle: SparkleParams,
    pub beat: BeatParams,
    pub fire: FireParams,
    pub static_color: Rgb,
}

impl EffectParams {
    pub const fn new() -> Self {
        Self {
            full_rainbow_speed: 40,
            animated_rainbow_speed: 5,
            chase: ChaseParams { hue: 100, speed: 2 },
            animated_palette_speed: 5,
            sparkle: SparkleParams { speed: 10, fade: 2 },
            beat: BeatParams {
                bpm: 30,
                fade: 5,
                color: Rgb { r: 33, g: 150, b: 243 },
            },
            fire: FireParams {
                speed: 25,
                cooling: 55,
                sparks: 120,
                reverse: false,
            },
            static_color: Rgb { r: 255, g: 255, b: 255 },
        }
    }
}

impl Default for EffectParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Millisecond setting as a timer period
pub(crate) fn period(ms: u16) -> Duration {
    Duration::from_millis(u64::from(ms))
}

/// 16-bit setting clamped into 8 bits
pub(crate) fn saturate8(value: u16) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

/// Per-pixel index step that spans the whole strip once
pub(crate) fn spread_step(len: usize) -> u8 {
    u8::try_from(255 / len.max(1)).unwrap_or(u8::MAX)
}
