//! Board wiring.

use embassy_net::Ipv4Address;

/// Base address of the `settings` data partition (see `partitions.csv`)
pub(crate) const SETTINGS_PARTITION_OFFSET: u32 = 0x31_0000;

/// Delay before touching any peripheral after power-up
pub(crate) const STARTUP_DELAY_MS: u64 = 3000;

/// Render and button sampling period
pub(crate) const FRAME_INTERVAL_MS: u64 = 10;

/// Grace period between a restart request and the reset
pub(crate) const RESTART_DELAY_MS: u64 = 500;

/// How often the supervisor checks the station link
pub(crate) const LINK_CHECK_INTERVAL_MS: u64 = 1000;

pub(crate) const AP_ADDRESS: Ipv4Address = Ipv4Address::new(192, 168, 4, 1);
pub(crate) const AP_PREFIX_LEN: u8 = 24;

/// WS2812 data line
macro_rules! led_gpio {
    ($p:expr) => {
        $p.GPIO15
    };
}

/// Active-high push button
macro_rules! button_gpio {
    ($p:expr) => {
        $p.GPIO5
    };
}
