use super::spread_step;
use crate::color::{GradientPalette, Rgb};

/// Sample `palette` evenly across the whole strip, starting at `start`.
pub fn fill_spread(leds: &mut [Rgb], palette: &GradientPalette, start: u8) {
    let step = spread_step(leds.len());
    palette.fill(leds, start, step);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::CYAN_PALETTE;

    #[test]
    fn spread_starts_at_offset() {
        let mut leds = [Rgb::default(); 72];
        fill_spread(&mut leds, &CYAN_PALETTE, 0);
        assert_eq!(leds[0], CYAN_PALETTE.sample(0));
        assert_eq!(leds[21], CYAN_PALETTE.sample(63));
        assert_eq!(leds[71], CYAN_PALETTE.sample(213));
    }
}
