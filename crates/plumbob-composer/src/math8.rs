//! 8-bit integer math in the style of `FastLED`'s `lib8tion`.

use embassy_time::Duration;

/// `sin8` lookup: (base, slope) pairs for each quarter-wave section.
const SIN8_SECTIONS: [u8; 8] = [0, 49, 49, 41, 90, 27, 117, 10];

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// `scale8(x, 255) == x`, so full scale is lossless.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Scale an 8-bit value, never dimming a non-zero value to zero.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn scale8_video(value: u8, scale: u8) -> u8 {
    let scaled = ((value as u16 * scale as u16) >> 8) as u8;
    if value != 0 && scale != 0 {
        scaled + 1
    } else {
        scaled
    }
}

/// Saturating 8-bit add.
#[inline]
pub const fn qadd8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Saturating 8-bit subtract.
#[inline]
pub const fn qsub8(a: u8, b: u8) -> u8 {
    a.saturating_sub(b)
}

/// Blend two 8-bit values
///
/// # Arguments
/// * `a` - First value
/// * `b` - Second value
/// * `amount_of_b` - Blend factor (0 = all a, 255 = almost all b)
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let a = i32::from(a);
    let b = i32::from(b);
    let amount = i32::from(amount_of_b);

    (a + (((b - a) * amount) >> 8)) as u8
}

/// Fast 8-bit sine approximation.
///
/// One full period over `0..=255`; `sin8(0) == 128`, peak 255 at 64,
/// trough 1 at 192.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn sin8(theta: u8) -> u8 {
    let mut offset = theta;
    if theta & 0x40 != 0 {
        offset = 255 - offset;
    }
    offset &= 0x3F;

    let mut secoffset = offset & 0x0F;
    if theta & 0x40 != 0 {
        secoffset += 1;
    }

    let section = usize::from(offset >> 4) * 2;
    let base = SIN8_SECTIONS[section];
    let slope = SIN8_SECTIONS[section + 1];
    let mx = (i16::from(slope) * i16::from(secoffset)) >> 4;

    let mut y = i16::from(base) + mx;
    if theta & 0x80 != 0 {
        y = -y;
    }
    (y + 128) as u8
}

/// 16-bit sawtooth advancing at `bpm` beats per minute.
///
/// Values below 256 are whole beats per minute; larger values are Q8.8.
#[allow(clippy::cast_possible_truncation)]
pub fn beat16(bpm: u16, elapsed: Duration) -> u16 {
    let bpm88 = if bpm < 256 { u64::from(bpm) << 8 } else { u64::from(bpm) };
    ((elapsed.as_millis() * bpm88 * 280) >> 16) as u16
}

/// 8-bit sawtooth advancing at `bpm` beats per minute.
#[allow(clippy::cast_possible_truncation)]
pub fn beat8(bpm: u16, elapsed: Duration) -> u8 {
    (beat16(bpm, elapsed) >> 8) as u8
}

/// Sine wave oscillating between `low` and `high` at `bpm` beats per minute.
pub fn beatsin8(bpm: u16, low: u8, high: u8, elapsed: Duration, phase: u8) -> u8 {
    let beat = beat8(bpm, elapsed);
    let wave = sin8(beat.wrapping_add(phase));
    let range = high.saturating_sub(low);
    low + scale8(wave, range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale8_full_scale_is_identity() {
        for v in 0..=255u8 {
            assert_eq!(scale8(v, 255), v);
        }
        assert_eq!(scale8(200, 0), 0);
        assert_eq!(scale8(255, 127), 127);
    }

    #[test]
    fn scale8_video_keeps_lit_pixels_lit() {
        assert_eq!(scale8_video(1, 1), 1);
        assert_eq!(scale8_video(0, 200), 0);
        assert_eq!(scale8_video(200, 0), 0);
    }

    #[test]
    fn saturating_ops_clamp() {
        assert_eq!(qadd8(200, 100), 255);
        assert_eq!(qsub8(10, 20), 0);
        assert_eq!(qadd8(1, 2), 3);
    }

    #[test]
    fn blend8_endpoints() {
        assert_eq!(blend8(10, 250, 0), 10);
        assert_eq!(blend8(0, 255, 128), 127);
        assert_eq!(blend8(255, 0, 255), 0);
    }

    #[test]
    fn sin8_quarter_points() {
        assert_eq!(sin8(0), 128);
        assert_eq!(sin8(64), 255);
        assert_eq!(sin8(128), 128);
        assert_eq!(sin8(192), 1);
    }

    #[test]
    fn beatsin8_stays_in_range() {
        for ms in (0..10_000u64).step_by(37) {
            let v = beatsin8(30, 0, 71, Duration::from_millis(ms), 0);
            assert!(v <= 71, "{} out of range at {} ms", v, ms);
        }
    }

    #[test]
    fn beat8_completes_one_cycle_per_beat() {
        // 60 bpm: one full sawtooth per second
        assert_eq!(beat8(60, Duration::from_millis(0)), 0);
        let half = beat8(60, Duration::from_millis(500));
        assert!((126..=130).contains(&half), "half beat was {}", half);
    }
}
