//! LED Driver abstraction layer
//!
//! Provides a trait-based abstraction for LED strip drivers,
//! allowing the animation engine to be hardware-agnostic.

use crate::color::Rgb;

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// Frames arrive fully processed (brightness and color correction applied).
pub trait LedDriver<const N: usize> {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb; N]);
}

impl<const N: usize, D: LedDriver<N>> LedDriver<N> for &mut D {
    fn write(&mut self, colors: &[Rgb; N]) {
        (**self).write(colors);
    }
}
