use embassy_time::{Delay, Duration, Timer};
use plumbob::{
    Credentials,
    NetworkLink as _,
    app::associate_forever,
    config::WIFI_CONNECT_ATTEMPTS,
};

use super::{HTTP_CONTROL, HttpCommand};
use crate::{config::LINK_CHECK_INTERVAL_MS, drivers::StationLink};

/// Keeps the station associated. The HTTP server only runs while the
/// link is up and is stopped for the duration of a reconnect.
#[embassy_executor::task]
pub(crate) async fn network_supervisor_task(mut link: StationLink, credentials: Credentials) {
    let mut delay = Delay;

    loop {
        let failures =
            associate_forever(&mut link, &mut delay, &credentials, WIFI_CONNECT_ATTEMPTS).await;
        match link.stack().config_v4() {
            Some(config) => log::info!(
                "network: online at {} after {} failed attempts",
                config.address,
                failures
            ),
            None => log::info!("network: online after {} failed attempts", failures),
        }
        HTTP_CONTROL.signal(HttpCommand::Serve);

        while link.is_connected() {
            Timer::after(Duration::from_millis(LINK_CHECK_INTERVAL_MS)).await;
        }

        log::warn!("network: connection lost, reconnecting");
        HTTP_CONTROL.signal(HttpCommand::Stop);
        link.disconnect().await;
    }
}
