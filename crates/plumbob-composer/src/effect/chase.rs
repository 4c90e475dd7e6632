use crate::color::Rgb;

/// Shift every pixel one step away from the head and put `color` at
/// pixel 0. The tail pixel falls off the end.
pub fn push_chase(leds: &mut [Rgb], color: Rgb) {
    if leds.is_empty() {
        return;
    }
    leds.copy_within(..leds.len() - 1, 1);
    leds[0] = color;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_move_down_by_one() {
        let a = Rgb::new(1, 0, 0);
        let b = Rgb::new(2, 0, 0);
        let c = Rgb::new(3, 0, 0);
        let mut leds = [a, b, c];
        push_chase(&mut leds, Rgb::new(9, 9, 9));
        assert_eq!(leds, [Rgb::new(9, 9, 9), a, b]);
    }

    #[test]
    fn single_pixel_is_replaced() {
        let mut leds = [Rgb::new(1, 1, 1)];
        push_chase(&mut leds, Rgb::new(2, 2, 2));
        assert_eq!(leds, [Rgb::new(2, 2, 2)]);
    }
}
