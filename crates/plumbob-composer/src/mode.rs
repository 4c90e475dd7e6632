//! Selectable lighting modes
//!
//! Mode numbers are part of the persisted settings and the control API,
//! so the discriminants are fixed.

const MODE_ID_STATIC_RAINBOW: u8 = 0;
const MODE_ID_FULL_RAINBOW: u8 = 1;
const MODE_ID_ANIMATED_RAINBOW: u8 = 2;
const MODE_ID_RANDOM_CHASE: u8 = 3;
const MODE_ID_STATIC_PALETTE: u8 = 4;
const MODE_ID_ANIMATED_PALETTE: u8 = 5;
const MODE_ID_SPARKLE: u8 = 6;
const MODE_ID_BEAT_COLOR: u8 = 7;
const MODE_ID_BEAT_PALETTE: u8 = 8;
const MODE_ID_FIRE: u8 = 9;
const MODE_ID_STATIC_COLOR: u8 = 10;

/// Known mode ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ModeId {
    /// Fixed hue gradient spanning the strip once
    StaticRainbow = MODE_ID_STATIC_RAINBOW,
    /// Whole strip in one slowly rotating hue
    FullRainbow = MODE_ID_FULL_RAINBOW,
    /// Rainbow sweeping along the strip
    AnimatedRainbow = MODE_ID_ANIMATED_RAINBOW,
    /// Random shades of one hue marching down the strip
    RandomChase = MODE_ID_RANDOM_CHASE,
    /// One-shot palette gradient
    StaticPalette = MODE_ID_STATIC_PALETTE,
    /// Scrolling palette gradient
    AnimatedPalette = MODE_ID_ANIMATED_PALETTE,
    /// Random palette sparkles fading to black
    Sparkle = MODE_ID_SPARKLE,
    /// A single color bouncing at a set BPM
    BeatColor = MODE_ID_BEAT_COLOR,
    /// Palette fill driven by two sine waves
    BeatPalette = MODE_ID_BEAT_PALETTE,
    /// Fire simulation
    Fire = MODE_ID_FIRE,
    /// Solid configured color
    StaticColor = MODE_ID_STATIC_COLOR,
}

impl ModeId {
    /// Number of modes
    pub const COUNT: usize = 11;

    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_STATIC_RAINBOW => Self::StaticRainbow,
            MODE_ID_FULL_RAINBOW => Self::FullRainbow,
            MODE_ID_ANIMATED_RAINBOW => Self::AnimatedRainbow,
            MODE_ID_RANDOM_CHASE => Self::RandomChase,
            MODE_ID_STATIC_PALETTE => Self::StaticPalette,
            MODE_ID_ANIMATED_PALETTE => Self::AnimatedPalette,
            MODE_ID_SPARKLE => Self::Sparkle,
            MODE_ID_BEAT_COLOR => Self::BeatColor,
            MODE_ID_BEAT_PALETTE => Self::BeatPalette,
            MODE_ID_FIRE => Self::Fire,
            MODE_ID_STATIC_COLOR => Self::StaticColor,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// Slot in per-mode tables
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Next mode in button order, wrapping from the last back to the first.
    pub const fn next(self) -> Self {
        match Self::from_raw(self.as_raw() + 1) {
            Some(mode) => mode,
            None => Self::StaticRainbow,
        }
    }
}
