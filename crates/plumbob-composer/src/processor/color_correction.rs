//! Color correction processor
//!
//! Applies multiplicative color correction to each RGB channel.
//!
//! The correction color represents the scaling factors for each channel:
//! - 0xFFFFFF = no correction (100% for all channels)
//! - 0xFFE08C = R at 100%, G at 88%, B at 55% (typical WS2812 string)

use crate::{
    color::{Rgb, rgb_from_u32},
    math8::scale8,
};

/// Profile for typical WS2812 pixel strings
pub const TYPICAL_PIXEL_STRING: u32 = 0xFF_E0_8C;

/// Color correction processor
///
/// Default is no correction (all channels at 100%).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorCorrection {
    /// Correction factors for each channel (0-255 = 0%-100%)
    factors: Rgb,
}

impl Default for ColorCorrection {
    fn default() -> Self {
        Self {
            factors: Rgb {
                r: 255,
                g: 255,
                b: 255,
            },
        }
    }
}

impl ColorCorrection {
    /// Create color correction from a u32 color value (0xRRGGBB format)
    pub const fn from_rgb(color: u32) -> Self {
        Self {
            factors: rgb_from_u32(color),
        }
    }

    /// Get current correction factors
    pub fn factors(&self) -> Rgb {
        self.factors
    }

    /// Check if correction is active (not all channels at 100%)
    pub fn is_active(&self) -> bool {
        self.factors.r != 255 || self.factors.g != 255 || self.factors.b != 255
    }

    /// Apply color correction to a frame
    pub fn apply<const N: usize>(&self, frame: &mut [Rgb; N]) {
        if !self.is_active() {
            return;
        }

        for pixel in frame.iter_mut() {
            pixel.r = scale8(pixel.r, self.factors.r);
            pixel.g = scale8(pixel.g, self.factors.g);
            pixel.b = scale8(pixel.b, self.factors.b);
        }
    }
}
