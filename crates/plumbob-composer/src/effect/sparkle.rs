use crate::{
    color::{GradientPalette, Rgb},
    random::Random8,
};

/// Light one random pixel with a random palette color.
pub fn sparkle(leds: &mut [Rgb], palette: &GradientPalette, rng: &mut Random8) {
    if leds.is_empty() {
        return;
    }
    let pixel = rng.index(leds.len());
    leds[pixel] = palette.sample(rng.any());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::CYAN_PALETTE;

    #[test]
    fn lights_exactly_one_pixel() {
        let mut rng = Random8::new(3);
        let mut leds = [Rgb::default(); 16];
        sparkle(&mut leds, &CYAN_PALETTE, &mut rng);
        let lit = leds.iter().filter(|p| **p != Rgb::default()).count();
        assert_eq!(lit, 1);
    }
}
