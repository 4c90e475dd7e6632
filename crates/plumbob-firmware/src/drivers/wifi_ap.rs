use embassy_executor::Spawner;
use embassy_net::{
    Ipv4Address,
    Ipv4Cidr,
    Stack,
    StackResources,
    StaticConfigV4,
    udp::{PacketMetadata, UdpSocket},
};
use embassy_time::{Duration, Timer};
use esp_hal::peripherals::WIFI;
use esp_radio::wifi::{AccessPointConfig, AuthMethod, Config, ModeConfig, WifiController};
use plumbob::{
    config::AP_SSID,
    net::dhcp::{self, CLIENT_PORT, REPLY_LEN, SERVER_PORT},
};
use static_cell::make_static;

use super::{MAX_NETWORK_CONNECTIONS, network_runner_task, random::get_seed};
use crate::config::{AP_ADDRESS, AP_PREFIX_LEN};

/// Bring up the open provisioning network on [`AP_ADDRESS`] and start
/// answering DHCP on it. Returns once the link is up.
pub(crate) async fn start_access_point(spawner: Spawner, wifi_device: WIFI<'static>) -> Stack<'static> {
    let esp_radio_ctrl = &*make_static!(esp_radio::init().expect("radio init failed"));
    let (controller, interfaces) =
        esp_radio::wifi::new(esp_radio_ctrl, wifi_device, Config::default())
            .expect("wifi init failed");

    let static_config = StaticConfigV4 {
        address: Ipv4Cidr::new(AP_ADDRESS, AP_PREFIX_LEN),
        gateway: Some(AP_ADDRESS),
        dns_servers: heapless::Vec::default(),
    };
    let net_config = embassy_net::Config::ipv4_static(static_config);

    let network_resources = make_static!(StackResources::<MAX_NETWORK_CONNECTIONS>::new());
    let (stack, runner) =
        embassy_net::new(interfaces.ap, net_config, network_resources, get_seed());

    spawner.spawn(access_point_task(controller)).ok();
    spawner.spawn(network_runner_task(runner)).ok();

    stack.wait_link_up().await;
    spawner.spawn(dhcp_server_task(stack)).ok();

    stack
}

/// Owns the controller for as long as the access point should exist.
#[embassy_executor::task]
async fn access_point_task(mut controller: WifiController<'static>) {
    let ap_config = AccessPointConfig::default()
        .with_ssid(AP_SSID.into())
        .with_auth_method(AuthMethod::None);

    let started = match controller.set_config(&ModeConfig::AccessPoint(ap_config)) {
        Ok(()) => controller.start_async().await,
        Err(err) => Err(err),
    };
    match started {
        Ok(()) => log::info!("network: access point '{}' started", AP_SSID),
        Err(err) => log::error!("network: access point failed: {:?}", err),
    }

    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}

#[embassy_executor::task]
async fn dhcp_server_task(stack: Stack<'static>) {
    let mut rx_meta = [PacketMetadata::EMPTY; 8];
    let mut rx_buffer = [0u8; 1024];
    let mut tx_meta = [PacketMetadata::EMPTY; 8];
    let mut tx_buffer = [0u8; 1024];
    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );

    if let Err(err) = socket.bind(SERVER_PORT) {
        log::error!("dhcp: bind to {} failed: {:?}", SERVER_PORT, err);
        return;
    }
    log::info!("dhcp: serving on port {}", SERVER_PORT);

    let mut packet = [0u8; 576];
    let mut reply = [0u8; REPLY_LEN];
    loop {
        let len = match socket.recv_from(&mut packet).await {
            Ok((len, _)) => len,
            Err(err) => {
                log::warn!("dhcp: recv error: {:?}", err);
                continue;
            }
        };
        let Some(request) = dhcp::parse_request(&packet[..len]) else {
            continue;
        };
        let Some(message_type) = request.message_type.reply() else {
            continue;
        };

        let offered = dhcp::lease_address(AP_ADDRESS, &request.client_mac);
        let Some(reply_len) = dhcp::build_reply(AP_ADDRESS, &request, offered, message_type, &mut reply)
        else {
            continue;
        };
        log::debug!("dhcp: {:?} {} to {:02x?}", message_type, offered, request.client_mac);

        let dest = (Ipv4Address::BROADCAST, CLIENT_PORT);
        if let Err(err) = socket.send_to(&reply[..reply_len], dest).await {
            log::warn!("dhcp: send error: {:?}", err);
        }
    }
}
