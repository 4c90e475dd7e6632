//! Gradient palettes
//!
//! A palette is an ordered list of `(position, color)` stops covering the
//! whole 8-bit index range. Sampling linearly interpolates between the two
//! stops that bracket the index.

use super::{Rgb, utils::blend_colors};

/// Single gradient stop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GradientStop {
    pub position: u8,
    pub color: Rgb,
}

impl GradientStop {
    pub const fn new(position: u8, r: u8, g: u8, b: u8) -> Self {
        Self {
            position,
            color: Rgb { r, g, b },
        }
    }
}

/// Immutable gradient palette.
///
/// Stops must be sorted by position, start at 0 and end at 255.
#[derive(Clone, Copy, Debug)]
pub struct GradientPalette {
    stops: &'static [GradientStop],
}

const CYAN_STOPS: [GradientStop; 5] = [
    GradientStop::new(0, 11, 0, 196),
    GradientStop::new(63, 0, 109, 212),
    GradientStop::new(127, 0, 153, 252),
    GradientStop::new(191, 0, 221, 255),
    GradientStop::new(255, 11, 0, 196),
];

const CONFIGURING_STOPS: [GradientStop; 3] = [
    GradientStop::new(0, 255, 0, 0),
    GradientStop::new(128, 0, 0, 255),
    GradientStop::new(255, 255, 0, 0),
];

/// Deep blue to cyan and back.
pub const CYAN_PALETTE: GradientPalette = GradientPalette::new(&CYAN_STOPS);

/// Red to blue and back, shown while the device waits for credentials.
pub const CONFIGURING_PALETTE: GradientPalette = GradientPalette::new(&CONFIGURING_STOPS);

impl GradientPalette {
    pub const fn new(stops: &'static [GradientStop]) -> Self {
        Self { stops }
    }

    /// Interpolated color at `index`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn sample(&self, index: u8) -> Rgb {
        let Some((first, rest)) = self.stops.split_first() else {
            return Rgb::default();
        };

        let mut lower = *first;
        for &upper in rest {
            if index <= upper.position {
                if index == upper.position {
                    return upper.color;
                }
                let span = u16::from(upper.position.saturating_sub(lower.position)).max(1);
                let offset = u16::from(index.saturating_sub(lower.position));
                let amount = ((offset * 255) / span) as u8;
                return blend_colors(lower.color, upper.color, amount);
            }
            lower = upper;
        }
        lower.color
    }

    /// Fill `leds` with palette samples starting at `start_index`, advancing
    /// the index by `increment` per pixel (wrapping).
    pub fn fill(&self, leds: &mut [Rgb], start_index: u8, increment: u8) {
        let mut index = start_index;
        for pixel in leds.iter_mut() {
            *pixel = self.sample(index);
            index = index.wrapping_add(increment);
        }
    }
}
