mod palette;
mod utils;

use smart_leds::RGB8;
use smart_leds::hsv::Hsv as HSV;

pub use palette::{CONFIGURING_PALETTE, CYAN_PALETTE, GradientPalette, GradientStop};
pub use utils::{blend_colors, fade_to_black_by, heat_color, hsv2rgb, rgb_from_u32};

pub type Rgb = RGB8;
pub type Hsv = HSV;
