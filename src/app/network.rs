//! Station association retry policy.
//!
//! Bounded: begin association, then poll the link once per delay.
//! Unbounded: repeat the bounded attempt with a backoff until the link is up.

use embedded_hal_async::delay::DelayNs;

use crate::{
    config::WIFI_RETRY_DELAY_MS,
    domain::{
        entity::Credentials,
        ports::{NetworkError, NetworkLink},
    },
};

/// Try to bring the link up, polling it at most `attempts` times.
pub async fn associate<L: NetworkLink, T: DelayNs>(
    link: &mut L,
    delay: &mut T,
    credentials: &Credentials,
    attempts: u32,
) -> Result<(), NetworkError> {
    log::info!("network: connecting to {}", credentials.ssid.as_str());
    link.begin(credentials).await?;

    for _ in 0..attempts {
        if link.is_connected() {
            log::info!("network: connection established");
            return Ok(());
        }
        delay.delay_ms(WIFI_RETRY_DELAY_MS).await;
    }

    if link.is_connected() {
        log::info!("network: connection established");
        return Ok(());
    }
    Err(NetworkError::Timeout)
}

/// Keep calling [`associate`] until it succeeds.
///
/// Returns the number of failed attempts before the link came up.
pub async fn associate_forever<L: NetworkLink, T: DelayNs>(
    link: &mut L,
    delay: &mut T,
    credentials: &Credentials,
    attempts: u32,
) -> u32 {
    let mut failures = 0;
    loop {
        match associate(link, delay, credentials, attempts).await {
            Ok(()) => return failures,
            Err(err) => {
                failures += 1;
                log::warn!("network: association failed: {:?}, retrying", err);
                link.disconnect().await;
                delay.delay_ms(WIFI_RETRY_DELAY_MS).await;
            }
        }
    }
}
