mod flash_storage;
mod led;
mod random;
mod wifi_ap;
mod wifi_sta;

use embassy_net::Runner;
use esp_radio::wifi::WifiDevice;

pub(crate) use flash_storage::PartitionStorage;
pub(crate) use led::StripDriver;
pub(crate) use random::get_seed;
pub(crate) use wifi_ap::start_access_point;
pub(crate) use wifi_sta::{StationLink, start_station};

const MAX_NETWORK_CONNECTIONS: usize = 6;

/// Drives the embassy-net stack of whichever interface is up
#[embassy_executor::task]
async fn network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}
