//! Global brightness
//!
//! One scale factor applied to every channel of every pixel right before
//! the frame is flushed.

use crate::{color::Rgb, math8::scale8};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlobalBrightness {
    /// Current brightness value (0-255)
    current: u8,
}

impl Default for GlobalBrightness {
    fn default() -> Self {
        Self { current: 255 }
    }
}

impl GlobalBrightness {
    pub const fn new(brightness: u8) -> Self {
        Self {
            current: brightness,
        }
    }

    pub fn set(&mut self, brightness: u8) {
        self.current = brightness;
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    /// Apply brightness to a frame
    pub fn apply<const N: usize>(&self, frame: &mut [Rgb; N]) {
        if self.current == 255 {
            // No scaling needed
            return;
        }

        if self.current == 0 {
            *frame = [Rgb::default(); N];
            return;
        }

        for pixel in frame.iter_mut() {
            pixel.r = scale8(pixel.r, self.current);
            pixel.g = scale8(pixel.g, self.current);
            pixel.b = scale8(pixel.b, self.current);
        }
    }
}
