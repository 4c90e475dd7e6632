pub use smart_leds::hsv::hsv2rgb;

use crate::{
    color::Rgb,
    math8::{blend8, scale8, scale8_video},
};

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = almost all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Dim every pixel towards black by `amount` (0 = unchanged, 255 = black).
pub fn fade_to_black_by(leds: &mut [Rgb], amount: u8) {
    let keep = 255 - amount;
    for pixel in leds.iter_mut() {
        pixel.r = scale8(pixel.r, keep);
        pixel.g = scale8(pixel.g, keep);
        pixel.b = scale8(pixel.b, keep);
    }
}

/// Map a heat value onto the black -> red -> yellow -> white ramp.
pub fn heat_color(temperature: u8) -> Rgb {
    // 0..=191 keeps the top band reachable but never saturated
    let t192 = scale8_video(temperature, 191);

    // ramp up 0..252 within each third
    let heatramp = (t192 & 0x3F) << 2;

    if t192 & 0x80 != 0 {
        Rgb {
            r: 255,
            g: 255,
            b: heatramp,
        }
    } else if t192 & 0x40 != 0 {
        Rgb {
            r: 255,
            g: heatramp,
            b: 0,
        }
    } else {
        Rgb {
            r: heatramp,
            g: 0,
            b: 0,
        }
    }
}
