use embassy_time::{Duration, Instant, Ticker, Timer};
use esp_hal::gpio::Input;
use plumbob::{ButtonClassifier, RestartReason};

use crate::{
    config::{FRAME_INTERVAL_MS, RESTART_DELAY_MS},
    device::{SharedDevice, with_device},
};

/// Samples the button, feeds the controller and pushes a frame every
/// [`FRAME_INTERVAL_MS`]. Also the place where requested restarts happen.
#[embassy_executor::task]
pub(crate) async fn render_task(device: &'static SharedDevice, button: Input<'static>) {
    let mut classifier = ButtonClassifier::new();
    let mut ticker = Ticker::every(Duration::from_millis(FRAME_INTERVAL_MS));

    loop {
        let now = Instant::now();
        let event = classifier.poll(button.is_high(), now);

        let restart = with_device(device, |controller| {
            if let Some(event) = event {
                log::info!("button: {:?}", event);
                if let Err(err) = controller.handle_button_event(event) {
                    log::error!("controller: {:?} failed: {:?}", event, err);
                }
            }
            controller.tick(now);
            controller.pending_restart()
        });

        if let Some(reason) = restart {
            reboot(reason).await;
        }
        ticker.next().await;
    }
}

async fn reboot(reason: RestartReason) -> ! {
    log::info!("controller: restarting ({:?})", reason);
    // lets an in-flight HTTP reply go out first
    Timer::after(Duration::from_millis(RESTART_DELAY_MS)).await;
    esp_hal::system::software_reset()
}
