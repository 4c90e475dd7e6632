//! Rainbow effects (modes 0, 1 and 2)

use smart_leds::hsv::{Hsv, hsv2rgb};

use crate::color::Rgb;

/// Saturation used for rainbow fills, slightly washed out like `FastLED`'s
const RAINBOW_SATURATION: u8 = 240;

/// Fill with consecutive hues starting at `start_hue`, `delta` apart.
pub fn fill_rainbow(leds: &mut [Rgb], start_hue: u8, delta: u8) {
    let mut hue = start_hue;
    for pixel in leds.iter_mut() {
        *pixel = hsv2rgb(Hsv {
            hue,
            sat: RAINBOW_SATURATION,
            val: 255,
        });
        hue = hue.wrapping_add(delta);
    }
}

/// Fill every pixel with one fully saturated hue.
pub fn fill_solid_hue(leds: &mut [Rgb], hue: u8) {
    let color = hsv2rgb(Hsv {
        hue,
        sat: 255,
        val: 255,
    });
    leds.fill(color);
}

/// Hue sweep where pixel `i` sits `i` steps past `base`.
#[allow(clippy::cast_possible_truncation)]
pub fn rainbow_step(leds: &mut [Rgb], base: u8) {
    for (i, pixel) in leds.iter_mut().enumerate() {
        *pixel = hsv2rgb(Hsv {
            hue: base.wrapping_add(i as u8),
            sat: 255,
            val: 255,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_hue_is_uniform() {
        let mut leds = [Rgb::default(); 8];
        fill_solid_hue(&mut leds, 42);
        assert!(leds.iter().all(|p| *p == leds[0]));
        assert_ne!(leds[0], Rgb::default());
    }

    #[test]
    fn sweep_offsets_by_index() {
        let mut leds = [Rgb::default(); 4];
        rainbow_step(&mut leds, 10);
        let expected = hsv2rgb(Hsv {
            hue: 13,
            sat: 255,
            val: 255,
        });
        assert_eq!(leds[3], expected);
    }
}
