use embassy_time::Duration;
use plumbob_composer::processor::TYPICAL_PIXEL_STRING;

/// Number of pixels on the strip
pub const LED_COUNT: usize = 72;

/// Fixed color correction profile applied to every flushed frame
pub const COLOR_CORRECTION: u32 = TYPICAL_PIXEL_STRING;

// Non-volatile layout

/// Size of the reserved non-volatile region
pub const STORAGE_SIZE: usize = 2048;
/// `1` once credentials were written, `0` after a factory reset
pub const CONFIGURED_FLAG_OFFSET: u32 = 0;
pub const SSID_LENGTH_OFFSET: u32 = 1;
pub const SSID_OFFSET: u32 = 2;
pub const PASSWORD_LENGTH_OFFSET: u32 = 63;
pub const PASSWORD_OFFSET: u32 = 64;
/// Start of the settings record, right after the credential head
pub const SETTINGS_OFFSET: u32 = 128;

pub const SSID_MAX_LEN: usize = 32;
pub const PASSWORD_MAX_LEN: usize = 64;

// Button

/// Presses at least this long toggle the strip
pub const MEDIUM_PRESS: Duration = Duration::from_millis(1000);
/// Presses at least this long wipe the device
pub const LONG_PRESS: Duration = Duration::from_millis(5000);

// Network

/// Link polls per association attempt
pub const WIFI_CONNECT_ATTEMPTS: u32 = 30;
/// Delay between link polls and between failed attempts
pub const WIFI_RETRY_DELAY_MS: u32 = 1000;

/// Open access point broadcast while unconfigured
pub const AP_SSID: &str = "Plumbob";
/// DHCP hostname in station mode
pub const HOSTNAME: &str = "plumbob";
pub const HTTP_PORT: u16 = 80;
