//! Output processing pipeline
//!
//! Applies post-processing to rendered frames before sending to hardware.
//! The engine's own buffer is never touched; processing works on a copy
//! so that effects which build on the previous frame (chase, sparkle,
//! beat) are not dimmed twice.

mod brightness;
mod color_correction;

pub use brightness::GlobalBrightness;
pub use color_correction::{ColorCorrection, TYPICAL_PIXEL_STRING};

use crate::{color::Rgb, driver::LedDriver};

/// Output processor - applies post-processing to frames
#[derive(Clone, Copy, Default)]
pub struct OutputProcessor {
    /// Global brightness
    pub brightness: GlobalBrightness,
    /// Fixed per-channel correction profile
    pub color_correction: ColorCorrection,
}

impl OutputProcessor {
    /// Create with specific brightness and correction
    pub fn new(brightness: u8, color_correction: ColorCorrection) -> Self {
        Self {
            brightness: GlobalBrightness::new(brightness),
            color_correction,
        }
    }

    /// Apply all processing to a frame
    ///
    /// Processing order:
    /// 1. Brightness scaling
    /// 2. Color correction
    pub fn apply<const N: usize>(&self, frame: &mut [Rgb; N]) {
        self.brightness.apply(frame);
        self.color_correction.apply(frame);
    }

    /// Process a copy of `frame` and hand it to `driver`.
    pub fn show<const N: usize, D: LedDriver<N>>(&self, frame: &[Rgb; N], driver: &mut D) {
        let mut output = *frame;
        self.apply(&mut output);
        driver.write(&output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Capture([Rgb; 2]);

    impl LedDriver<2> for Capture {
        fn write(&mut self, colors: &[Rgb; 2]) {
            self.0 = *colors;
        }
    }

    #[test]
    fn show_leaves_source_untouched() {
        let processor = OutputProcessor::new(127, ColorCorrection::default());
        let frame = [Rgb::new(200, 100, 0); 2];
        let mut driver = Capture([Rgb::default(); 2]);
        processor.show(&frame, &mut driver);
        assert_eq!(frame[0], Rgb::new(200, 100, 0));
        assert_eq!(driver.0[0], Rgb::new(100, 50, 0));
    }

    #[test]
    fn correction_follows_brightness() {
        let processor = OutputProcessor::new(255, ColorCorrection::from_rgb(TYPICAL_PIXEL_STRING));
        let mut frame = [Rgb::new(255, 255, 255); 2];
        processor.apply(&mut frame);
        assert_eq!(frame[0], Rgb::new(0xFF, 0xE0, 0x8C));
    }
}
