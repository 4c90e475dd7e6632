use crate::color::Rgb;

/// Fill all LEDs with a single solid color.
pub fn fill_solid(leds: &mut [Rgb], color: Rgb) {
    leds.fill(color);
}
