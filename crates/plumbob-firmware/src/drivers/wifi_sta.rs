use core::str::FromStr;

use embassy_executor::Spawner;
use embassy_net::{DhcpConfig, Stack, StackResources};
use embassy_time::{Duration, with_timeout};
use esp_hal::peripherals::WIFI;
use esp_radio::wifi::{
    AuthMethod,
    ClientConfig,
    Config,
    ModeConfig,
    WifiController,
    WifiError,
    WifiStaState,
};
use heapless::String;
use plumbob::{Credentials, NetworkError, NetworkLink, config::HOSTNAME};
use static_cell::make_static;

use super::{MAX_NETWORK_CONNECTIONS, network_runner_task, random::get_seed};

/// Upper bound for a single association handshake; link polling covers
/// the DHCP part afterwards
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Station interface with DHCP, hostname [`HOSTNAME`].
pub(crate) struct StationLink {
    controller: WifiController<'static>,
    stack: Stack<'static>,
}

impl StationLink {
    pub(crate) fn stack(&self) -> Stack<'static> {
        self.stack
    }
}

/// Bring up the radio in station mode and spawn the network runner.
pub(crate) fn start_station(spawner: Spawner, wifi_device: WIFI<'static>) -> StationLink {
    let esp_radio_ctrl = &*make_static!(esp_radio::init().expect("radio init failed"));
    let (controller, interfaces) =
        esp_radio::wifi::new(esp_radio_ctrl, wifi_device, Config::default())
            .expect("wifi init failed");

    let mut dhcp_config = DhcpConfig::default();
    dhcp_config.hostname = String::from_str(HOSTNAME).ok();
    let net_config = embassy_net::Config::dhcpv4(dhcp_config);

    let network_resources = make_static!(StackResources::<MAX_NETWORK_CONNECTIONS>::new());
    let (stack, runner) =
        embassy_net::new(interfaces.sta, net_config, network_resources, get_seed());
    spawner.spawn(network_runner_task(runner)).ok();

    StationLink { controller, stack }
}

fn driver_error(err: WifiError) -> NetworkError {
    log::warn!("network: wifi driver error: {:?}", err);
    NetworkError::Driver
}

impl NetworkLink for StationLink {
    async fn begin(&mut self, credentials: &Credentials) -> Result<(), NetworkError> {
        if !matches!(self.controller.is_started(), Ok(true)) {
            let client_config = if credentials.password.is_empty() {
                ClientConfig::default()
                    .with_ssid(credentials.ssid.as_str().into())
                    .with_auth_method(AuthMethod::None)
            } else {
                ClientConfig::default()
                    .with_ssid(credentials.ssid.as_str().into())
                    .with_password(credentials.password.as_str().into())
            };
            self.controller
                .set_config(&ModeConfig::Client(client_config))
                .map_err(driver_error)?;
            self.controller.start_async().await.map_err(driver_error)?;
        }

        match with_timeout(CONNECT_TIMEOUT, self.controller.connect_async()).await {
            Ok(Err(err)) => Err(driver_error(err)),
            // a slow handshake is left to the link polls
            Ok(Ok(())) | Err(_) => Ok(()),
        }
    }

    fn is_connected(&mut self) -> bool {
        esp_radio::wifi::sta_state() == WifiStaState::Connected && self.stack.is_config_up()
    }

    async fn disconnect(&mut self) {
        if let Err(err) = self.controller.disconnect_async().await {
            log::debug!("network: disconnect: {:?}", err);
        }
    }
}
