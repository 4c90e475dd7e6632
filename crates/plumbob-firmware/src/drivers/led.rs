use esp_hal::xtensa_lx::interrupt;
use esp_hal::{gpio::interconnect::PeripheralOutput, peripherals::RMT, rmt::Rmt, time::Rate};
use esp_hal_smartled::{SmartLedsAdapter, buffer_size, smart_led_buffer};
use plumbob::config::LED_COUNT;
use plumbob_composer::{LedDriver, Rgb};
use smart_leds::SmartLedsWrite;
use static_cell::make_static;

/// WS2812 strip on the RMT peripheral.
///
/// Frames are pushed with interrupts masked, the RMT timing does not
/// survive the radio interrupt otherwise.
pub(crate) struct StripDriver {
    adapter: SmartLedsAdapter<'static, { buffer_size(LED_COUNT) }>,
}

impl StripDriver {
    pub(crate) fn new<O>(rmt: RMT<'static>, pin: O) -> Self
    where
        O: PeripheralOutput<'static>,
    {
        let rmt = Rmt::new(rmt, Rate::from_mhz(80)).expect("RMT clock rejected");
        let rmt_buffer = make_static!(smart_led_buffer!(LED_COUNT));
        let adapter = SmartLedsAdapter::new(rmt.channel0, pin, rmt_buffer);

        Self { adapter }
    }
}

impl LedDriver<LED_COUNT> for StripDriver {
    fn write(&mut self, colors: &[Rgb; LED_COUNT]) {
        let result = interrupt::free(|| self.adapter.write(colors.iter().copied()));
        if let Err(err) = result {
            log::warn!("strip: write failed: {:?}", err);
        }
    }
}
