//! Beat-synced effects (modes 7 and 8)

use embassy_time::Duration;

use super::{BeatParams, saturate8};
use crate::{
    color::{GradientPalette, Rgb, fade_to_black_by},
    math8::beatsin8,
};

/// Palette index step between neighbouring pixels in mode 8
const BEAT_PALETTE_STEP: u8 = 10;

/// Paint the beat color at a sine-driven position, then fade the strip.
pub fn beat_color(leds: &mut [Rgb], params: &BeatParams, elapsed: Duration) {
    if leds.is_empty() {
        return;
    }
    let last = u8::try_from(leds.len() - 1).unwrap_or(u8::MAX);
    let position = usize::from(beatsin8(params.bpm, 0, last, elapsed, 0));
    if let Some(pixel) = leds.get_mut(position) {
        *pixel = params.color;
    }
    fade_to_black_by(leds, saturate8(params.fade));
}

/// Palette fill whose offset is the mean of two slow sine waves.
#[allow(clippy::cast_possible_truncation)]
pub fn beat_palette(leds: &mut [Rgb], palette: &GradientPalette, elapsed: Duration) {
    let beat_a = u16::from(beatsin8(30, 0, 255, elapsed, 0));
    let beat_b = u16::from(beatsin8(20, 0, 255, elapsed, 0));
    let start = ((beat_a + beat_b) / 2) as u8;
    palette.fill(leds, start, BEAT_PALETTE_STEP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::CYAN_PALETTE;

    #[test]
    fn beat_lights_the_sine_position() {
        let params = BeatParams {
            bpm: 30,
            fade: 0,
            color: Rgb::new(33, 150, 243),
        };
        let mut leds = [Rgb::default(); 72];
        // sin8(0) sits at mid-range
        beat_color(&mut leds, &params, Duration::from_millis(0));
        assert_eq!(leds[36], Rgb::new(33, 150, 243));
        assert_eq!(leds.iter().filter(|p| **p != Rgb::default()).count(), 1);
    }

    #[test]
    fn beat_fade_dims_previous_frame() {
        let params = BeatParams {
            bpm: 30,
            fade: 128,
            color: Rgb::new(200, 200, 200),
        };
        let mut leds = [Rgb::new(100, 100, 100); 72];
        beat_color(&mut leds, &params, Duration::from_millis(0));
        assert!(leds[0].r < 100);
    }

    #[test]
    fn beat_palette_at_start_uses_mid_index() {
        let mut leds = [Rgb::default(); 4];
        beat_palette(&mut leds, &CYAN_PALETTE, Duration::from_millis(0));
        // both sines start at 128
        assert_eq!(leds[0], CYAN_PALETTE.sample(128));
        assert_eq!(leds[1], CYAN_PALETTE.sample(138));
    }
}
