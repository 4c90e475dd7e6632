use core::fmt::Write as _;

use heapless::String;
use plumbob_composer::Rgb;
use serde::{Deserialize, Serialize};

use super::entity::SettingsRecord;

/// Optional per-mode parameters supplied with a mode change.
///
/// Keys that a mode does not use are ignored; absent keys leave the
/// stored value unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeParams {
    pub speed: Option<u16>,
    /// Hue for the chase mode
    pub color: Option<u16>,
    pub fade: Option<u16>,
    pub bpm: Option<u16>,
    pub red: Option<u8>,
    pub green: Option<u8>,
    pub blue: Option<u8>,
    pub cooling: Option<u16>,
    pub sparks: Option<u16>,
    pub reverse: Option<bool>,
}

impl ModeParams {
    /// RGB triple, only when all three channels are present
    pub fn rgb(&self) -> Option<Rgb> {
        Some(Rgb::new(self.red?, self.green?, self.blue?))
    }
}

/// `"r,g,b"` rendering of a color
pub type RgbString = String<12>;

fn rgb_string(color: Rgb) -> RgbString {
    let mut out = RgbString::new();
    // 11 bytes at most, always fits
    let _ = write!(out, "{},{},{}", color.r, color.g, color.b);
    out
}

/// Flat view of every current setting, in wire field order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SettingsSnapshot {
    pub brightness: u16,
    pub mode: u8,
    pub led_enabled: bool,
    pub full_rainbow_speed: u16,
    pub animated_rainbow_speed: u16,
    pub random_static_color: u16,
    pub random_static_color_speed: u16,
    pub animated_palette_speed: u16,
    pub fade_to_black_speed: u16,
    pub fade_to_black_fade_speed: u16,
    pub bpm_color: u16,
    pub fade_color_speed: u16,
    /// Beat color
    pub b_rgb_color: RgbString,
    pub fire_speed: u16,
    pub fire_cooling: u16,
    pub fire_sparks: u16,
    pub fire_reverse: bool,
    /// Static color
    pub s_rgb_color: RgbString,
}

impl From<&SettingsRecord> for SettingsSnapshot {
    fn from(record: &SettingsRecord) -> Self {
        let effects = &record.effects;
        Self {
            brightness: record.brightness,
            mode: record.mode,
            led_enabled: record.enabled,
            full_rainbow_speed: effects.full_rainbow_speed,
            animated_rainbow_speed: effects.animated_rainbow_speed,
            random_static_color: effects.chase.hue,
            random_static_color_speed: effects.chase.speed,
            animated_palette_speed: effects.animated_palette_speed,
            fade_to_black_speed: effects.sparkle.speed,
            fade_to_black_fade_speed: effects.sparkle.fade,
            bpm_color: effects.beat.bpm,
            fade_color_speed: effects.beat.fade,
            b_rgb_color: rgb_string(effects.beat.color),
            fire_speed: effects.fire.speed,
            fire_cooling: effects.fire.cooling,
            fire_sparks: effects.fire.sparks,
            fire_reverse: effects.fire.reverse,
            s_rgb_color: rgb_string(effects.static_color),
        }
    }
}

/// Body of `POST /enable`
#[derive(Debug, Deserialize)]
pub struct EnableRequest {
    pub enabled: bool,
}

/// Body of `POST /brightness`
#[derive(Debug, Deserialize)]
pub struct BrightnessRequest {
    pub brightness: u16,
}

/// Body of `POST /settings`
#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    pub mode: u8,
    pub speed: Option<u16>,
    pub color: Option<u16>,
    pub fade: Option<u16>,
    pub bpm: Option<u16>,
    pub red: Option<u8>,
    pub green: Option<u8>,
    pub blue: Option<u8>,
    pub cooling: Option<u16>,
    pub sparks: Option<u16>,
    pub reverse: Option<bool>,
}

impl SettingsRequest {
    /// Split into the mode number and its parameters
    pub fn into_parts(self) -> (u8, ModeParams) {
        let params = ModeParams {
            speed: self.speed,
            color: self.color,
            fade: self.fade,
            bpm: self.bpm,
            red: self.red,
            green: self.green,
            blue: self.blue,
            cooling: self.cooling,
            sparks: self.sparks,
            reverse: self.reverse,
        };
        (self.mode, params)
    }
}

/// Body of `POST /configuration`
///
/// Both fields are sized past the credential limits so that oversize
/// values reach validation instead of failing to parse.
#[derive(Debug, Deserialize)]
pub struct ConfigurationRequest {
    pub ssid: String<64>,
    pub password: String<96>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_needs_all_channels() {
        let mut params = ModeParams {
            red: Some(1),
            green: Some(2),
            ..ModeParams::default()
        };
        assert_eq!(params.rgb(), None);
        params.blue = Some(3);
        assert_eq!(params.rgb(), Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn snapshot_formats_colors() {
        let mut record = SettingsRecord::new();
        record.effects.static_color = Rgb::new(0, 128, 255);
        let snapshot = SettingsSnapshot::from(&record);
        assert_eq!(snapshot.s_rgb_color.as_str(), "0,128,255");
        assert_eq!(snapshot.b_rgb_color.as_str(), "33,150,243");
    }
}
