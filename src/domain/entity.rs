use heapless::String;
use plumbob_composer::EffectParams;

use crate::config::{PASSWORD_MAX_LEN, SSID_MAX_LEN};

/// Every persisted user preference.
///
/// Field widths match the non-volatile layout: values are kept exactly as
/// they were set or loaded, range clamping happens at render time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettingsRecord {
    pub brightness: u16,
    /// Raw mode number; values above 10 render nothing
    pub mode: u8,
    pub enabled: bool,
    pub effects: EffectParams,
}

impl SettingsRecord {
    /// Compiled-in first boot defaults
    pub const fn new() -> Self {
        Self {
            brightness: 5,
            mode: 0,
            enabled: false,
            effects: EffectParams::new(),
        }
    }

    /// Brightness as applied to the strip
    pub fn output_brightness(&self) -> u8 {
        u8::try_from(self.brightness).unwrap_or(u8::MAX)
    }
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Network name and passphrase of the home network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub ssid: String<SSID_MAX_LEN>,
    pub password: String<PASSWORD_MAX_LEN>,
}

impl Credentials {
    /// Build a credential pair.
    ///
    /// Returns `None` when the name is empty or longer than 32 bytes, or
    /// the passphrase is longer than 64 bytes.
    pub fn new(ssid: &str, password: &str) -> Option<Self> {
        if ssid.is_empty() {
            return None;
        }
        Some(Self {
            ssid: String::try_from(ssid).ok()?,
            password: String::try_from(password).ok()?,
        })
    }
}

/// Top level operating state, fixed for the lifetime of a boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceState {
    /// No credentials stored, access point and configuration endpoint only
    Unconfigured,
    /// Joined the home network, full control surface
    Connected,
}

/// Why the device asked to be restarted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestartReason {
    /// New credentials were stored
    Provisioned,
    /// The non-volatile region was wiped
    FactoryReset,
}

/// Classified button press
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Under a second
    ShortPress,
    /// One to five seconds
    MediumPress,
    /// Five seconds or more
    LongPress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_bounds() {
        assert!(Credentials::new("", "secret").is_none());
        assert!(Credentials::new("a", "").is_some());
        let name = "n".repeat(32);
        assert!(Credentials::new(&name, "x").is_some());
        let name = "n".repeat(33);
        assert!(Credentials::new(&name, "x").is_none());
        let pass = "p".repeat(64);
        assert!(Credentials::new("net", &pass).is_some());
        let pass = "p".repeat(65);
        assert!(Credentials::new("net", &pass).is_none());
    }

    #[test]
    fn output_brightness_saturates() {
        let mut record = SettingsRecord::new();
        assert_eq!(record.output_brightness(), 5);
        record.brightness = 1000;
        assert_eq!(record.output_brightness(), 255);
    }
}
