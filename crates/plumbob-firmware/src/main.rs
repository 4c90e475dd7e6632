#![no_std]
#![no_main]

#[macro_use]
mod config;
mod device;
mod drivers;
mod http;
mod tasks;

use core::cell::RefCell;

use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Instant, Timer};
use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{
    clock::CpuClock,
    gpio::{Input, InputConfig, Pull},
    timer::timg::TimerGroup,
};
use esp_println::println;
use plumbob::{DeviceController, DeviceState, config::AP_SSID};

use crate::config::{AP_ADDRESS, STARTUP_DELAY_MS};
use crate::device::{Device, SharedDevice};
use crate::drivers::{PartitionStorage, StripDriver, get_seed, start_access_point, start_station};
use crate::tasks::{
    HTTP_CONTROL,
    HttpCommand,
    http_server_task,
    network_supervisor_task,
    render_task,
};

esp_bootloader_esp_idf::esp_app_desc!();

// static_cell::make_static! in main causes a compiler error
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write(($val));
        x
    }};
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    println!("=================================");
    println!("  Plumbob");
    println!("=================================");

    // Initialize hardware
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Allocate heap memory (64 + 32 KB)
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    Timer::after(Duration::from_millis(STARTUP_DELAY_MS)).await;

    let storage = PartitionStorage::new(peripherals.FLASH);
    let strip = StripDriver::new(peripherals.RMT, led_gpio!(peripherals));
    let controller: Device = DeviceController::boot(storage, strip, get_seed(), Instant::now())
        .expect("settings storage unavailable");
    let state = controller.state();
    let credentials = controller.credentials().cloned();
    let device = &*mk_static!(SharedDevice, Mutex::new(RefCell::new(controller)));

    let button = Input::new(
        button_gpio!(peripherals),
        InputConfig::default().with_pull(Pull::Down),
    );
    spawner.spawn(render_task(device, button)).ok();

    match (state, credentials) {
        (DeviceState::Connected, Some(credentials)) => {
            let link = start_station(spawner, peripherals.WIFI);
            spawner.spawn(http_server_task(link.stack(), device)).ok();
            spawner
                .spawn(network_supervisor_task(link, credentials))
                .ok();
        }
        _ => {
            let stack = start_access_point(spawner, peripherals.WIFI).await;
            spawner.spawn(http_server_task(stack, device)).ok();
            HTTP_CONTROL.signal(HttpCommand::Serve);

            println!("Connect to WiFi: {}", AP_SSID);
            println!("POST credentials to http://{}/configuration", AP_ADDRESS);
        }
    }

    loop {
        Timer::after(Duration::from_secs(5)).await;
    }
}
