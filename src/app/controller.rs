//! Device controller
//!
//! Owns the in-memory settings, the animation engine and the strip output,
//! and is the single entry point for the button, the render loop and the
//! control API. Restarts are requested, never performed: the firmware
//! polls [`DeviceController::pending_restart`] after every call. While one
//! is pending every mutating call fails with
//! [`DeviceError::RestartPending`].

use embassy_time::Instant;
use embedded_storage::Storage;
use plumbob_composer::{
    AnimationEngine,
    ColorCorrection,
    LedDriver,
    ModeId,
    OutputProcessor,
};

use crate::{
    config::COLOR_CORRECTION,
    domain::{
        dto::{ModeParams, SettingsSnapshot},
        entity::{ButtonEvent, Credentials, DeviceState, RestartReason, SettingsRecord},
        ports::DeviceError,
    },
    infrastructure::SettingsCodec,
};

pub struct DeviceController<S: Storage, D: LedDriver<N>, const N: usize> {
    codec: SettingsCodec<S>,
    engine: AnimationEngine<N>,
    output: OutputProcessor,
    driver: D,
    settings: SettingsRecord,
    state: DeviceState,
    credentials: Option<Credentials>,
    restart: Option<RestartReason>,
}

impl<S: Storage, D: LedDriver<N>, const N: usize> DeviceController<S, D, N> {
    /// Pick the operating state from storage.
    ///
    /// Without stored credentials the device starts unconfigured and the
    /// compiled-in defaults are written back. Otherwise credentials and
    /// settings are loaded.
    pub fn boot(storage: S, driver: D, seed: u64, now: Instant) -> Result<Self, DeviceError> {
        let mut codec = SettingsCodec::new(storage);

        let credentials = if codec.read_configured_flag()? {
            let credentials = codec.load_credentials()?;
            if credentials.is_none() {
                log::warn!("controller: configured flag set but credentials are unreadable");
            }
            credentials
        } else {
            None
        };

        let (state, settings) = if credentials.is_some() {
            log::info!("controller: configured, loading settings");
            (DeviceState::Connected, codec.load()?)
        } else {
            log::info!("controller: not configured, starting configuration mode");
            let settings = SettingsRecord::new();
            codec.save(&settings)?;
            (DeviceState::Unconfigured, settings)
        };

        let mut controller = Self {
            codec,
            engine: AnimationEngine::new(seed, now),
            output: OutputProcessor::new(
                settings.output_brightness(),
                ColorCorrection::from_rgb(COLOR_CORRECTION),
            ),
            driver,
            settings,
            state,
            credentials,
            restart: None,
        };
        controller.show_blank();
        Ok(controller)
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Stored credentials, present only when connected
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn settings(&self) -> &SettingsRecord {
        &self.settings
    }

    pub fn engine(&self) -> &AnimationEngine<N> {
        &self.engine
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn storage(&self) -> &S {
        self.codec.storage()
    }

    pub fn pending_restart(&self) -> Option<RestartReason> {
        self.restart
    }

    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), DeviceError> {
        self.ensure_running()?;
        self.settings.enabled = enabled;
        log::info!("controller: LEDs {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    pub fn set_brightness(&mut self, brightness: u16) -> Result<(), DeviceError> {
        self.ensure_running()?;
        self.settings.brightness = brightness;
        log::info!("controller: brightness set to {}", brightness);
        Ok(())
    }

    /// Switch mode and update the parameters that mode understands.
    pub fn set_mode(&mut self, mode: u8, params: &ModeParams) -> Result<(), DeviceError> {
        self.ensure_running()?;
        let mode = ModeId::from_raw(mode).ok_or(DeviceError::UnknownMode)?;
        self.settings.mode = mode.as_raw();
        apply_mode_params(&mut self.settings, mode, params);
        log::info!("controller: mode set to {}", mode.as_raw());
        Ok(())
    }

    /// Write the in-memory settings to storage.
    pub fn persist(&mut self) -> Result<(), DeviceError> {
        self.ensure_running()?;
        self.codec.save(&self.settings)?;
        log::info!("controller: settings saved");
        Ok(())
    }

    pub fn settings_snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot::from(&self.settings)
    }

    /// Store new network credentials and ask for a restart.
    ///
    /// Only accepted while unconfigured. Nothing is written when the pair
    /// is rejected.
    pub fn submit_credentials(&mut self, ssid: &str, password: &str) -> Result<(), DeviceError> {
        self.ensure_running()?;
        if self.state != DeviceState::Unconfigured {
            return Err(DeviceError::NotAvailable);
        }
        let credentials = Credentials::new(ssid, password).ok_or(DeviceError::InvalidCredentials)?;
        self.codec.save_credentials(&credentials)?;
        self.show_blank();
        self.restart = Some(RestartReason::Provisioned);
        log::info!("controller: credentials stored, restart requested");
        Ok(())
    }

    /// Wipe the reserved region and ask for a restart.
    pub fn request_factory_reset(&mut self) -> Result<(), DeviceError> {
        self.ensure_running()?;
        log::info!("controller: factory reset");
        self.show_blank();
        self.codec.erase_all()?;
        self.restart = Some(RestartReason::FactoryReset);
        Ok(())
    }

    pub fn handle_button_event(&mut self, event: ButtonEvent) -> Result<(), DeviceError> {
        self.ensure_running()?;
        match event {
            ButtonEvent::ShortPress => {
                let next = ModeId::from_raw(self.settings.mode)
                    .map_or(ModeId::StaticRainbow, ModeId::next);
                self.settings.mode = next.as_raw();
                self.show_blank();
                log::info!("controller: mode set to {}", next.as_raw());
            }
            ButtonEvent::MediumPress => {
                self.set_enabled(!self.settings.enabled)?;
            }
            ButtonEvent::LongPress => {
                self.request_factory_reset()?;
            }
        }
        Ok(())
    }

    /// Render one frame for the current state and flush it.
    pub fn tick(&mut self, now: Instant) {
        if self.restart.is_some() {
            return;
        }

        match self.state {
            DeviceState::Unconfigured => {
                self.engine.render_configuring(&self.settings.effects, now);
            }
            DeviceState::Connected if self.settings.enabled => {
                // unknown stored modes leave the frame as it is
                if let Some(mode) = ModeId::from_raw(self.settings.mode) {
                    self.engine.render(mode, &self.settings.effects, now);
                }
            }
            DeviceState::Connected => self.engine.clear(),
        }

        self.output.brightness.set(self.settings.output_brightness());
        self.output.show(self.engine.frame(), &mut self.driver);
    }

    /// Once a restart is pending the stored image must stay as it is.
    fn ensure_running(&self) -> Result<(), DeviceError> {
        match self.restart {
            Some(_) => Err(DeviceError::RestartPending),
            None => Ok(()),
        }
    }

    fn show_blank(&mut self) {
        self.engine.clear();
        self.output.show(self.engine.frame(), &mut self.driver);
    }
}

/// Copy the keys `mode` understands from `params` into `settings`
fn apply_mode_params(settings: &mut SettingsRecord, mode: ModeId, params: &ModeParams) {
    let effects = &mut settings.effects;
    match mode {
        ModeId::FullRainbow => {
            set(&mut effects.full_rainbow_speed, params.speed);
        }
        ModeId::AnimatedRainbow => {
            set(&mut effects.animated_rainbow_speed, params.speed);
        }
        ModeId::RandomChase => {
            set(&mut effects.chase.hue, params.color);
            set(&mut effects.chase.speed, params.speed);
        }
        ModeId::AnimatedPalette => {
            set(&mut effects.animated_palette_speed, params.speed);
        }
        ModeId::Sparkle => {
            set(&mut effects.sparkle.speed, params.speed);
            set(&mut effects.sparkle.fade, params.fade);
        }
        ModeId::BeatColor => {
            set(&mut effects.beat.bpm, params.bpm);
            set(&mut effects.beat.fade, params.fade);
            set(&mut effects.beat.color, params.rgb());
        }
        ModeId::Fire => {
            set(&mut effects.fire.speed, params.speed);
            set(&mut effects.fire.cooling, params.cooling);
            set(&mut effects.fire.sparks, params.sparks);
            set(&mut effects.fire.reverse, params.reverse);
        }
        ModeId::StaticColor => {
            set(&mut effects.static_color, params.rgb());
        }
        ModeId::StaticRainbow | ModeId::StaticPalette | ModeId::BeatPalette => {}
    }
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use plumbob_composer::Rgb;

    use super::*;
    use crate::{config::STORAGE_SIZE, infrastructure::MemoryStorage};

    const N: usize = 8;

    #[derive(Default)]
    struct CountingDriver {
        frames: usize,
        last: [Rgb; N],
    }

    impl LedDriver<N> for CountingDriver {
        fn write(&mut self, colors: &[Rgb; N]) {
            self.frames += 1;
            self.last = *colors;
        }
    }

    type Controller = DeviceController<MemoryStorage<STORAGE_SIZE>, CountingDriver, N>;

    fn connected() -> Controller {
        let mut codec = SettingsCodec::new(MemoryStorage::new());
        codec
            .save_credentials(&Credentials::new("net", "pass").unwrap())
            .unwrap();
        codec.save(&SettingsRecord::new()).unwrap();
        let storage = codec.into_inner();
        DeviceController::boot(storage, CountingDriver::default(), 1, Instant::from_millis(0))
            .unwrap()
    }

    #[test]
    fn short_press_wraps_mode() {
        let mut controller = connected();
        controller.set_mode(10, &ModeParams::default()).unwrap();
        controller.handle_button_event(ButtonEvent::ShortPress).unwrap();
        assert_eq!(controller.settings().mode, 0);
        for expected in 1..=10 {
            controller.handle_button_event(ButtonEvent::ShortPress).unwrap();
            assert_eq!(controller.settings().mode, expected);
        }
    }

    #[test]
    fn medium_press_toggles_enabled() {
        let mut controller = connected();
        assert!(!controller.settings().enabled);
        controller.handle_button_event(ButtonEvent::MediumPress).unwrap();
        assert!(controller.settings().enabled);
        controller.handle_button_event(ButtonEvent::MediumPress).unwrap();
        assert!(!controller.settings().enabled);
    }

    #[test]
    fn unknown_mode_changes_nothing() {
        let mut controller = connected();
        let params = ModeParams {
            speed: Some(1),
            ..ModeParams::default()
        };
        assert_eq!(controller.set_mode(11, &params), Err(DeviceError::UnknownMode));
        assert_eq!(*controller.settings(), SettingsRecord::new());
    }

    #[test]
    fn keys_outside_the_mode_are_ignored() {
        let mut controller = connected();
        let params = ModeParams {
            speed: Some(7),
            cooling: Some(1),
            red: Some(1),
            green: Some(2),
            blue: Some(3),
            ..ModeParams::default()
        };
        controller.set_mode(1, &params).unwrap();
        let effects = controller.settings().effects;
        assert_eq!(effects.full_rainbow_speed, 7);
        assert_eq!(effects.fire.cooling, 55);
        assert_eq!(effects.static_color, Rgb::new(255, 255, 255));
        assert_eq!(effects.beat.color, Rgb::new(33, 150, 243));
    }

    #[test]
    fn disabled_strip_is_dark() {
        let mut controller = connected();
        controller.set_mode(10, &ModeParams::default()).unwrap();
        controller.set_brightness(255);
        controller.tick(Instant::from_millis(1));
        assert!(controller.driver().last.iter().all(|p| *p == Rgb::default()));

        controller.set_enabled(true);
        controller.tick(Instant::from_millis(2));
        assert!(controller.driver().last.iter().all(|p| *p != Rgb::default()));
    }

    #[test]
    fn unknown_stored_mode_keeps_frame() {
        let mut controller = connected();
        controller.set_enabled(true);
        controller.set_brightness(255);
        controller.set_mode(10, &ModeParams::default()).unwrap();
        controller.tick(Instant::from_millis(1));
        let before = controller.driver().last;

        controller.settings.mode = 42;
        controller.tick(Instant::from_millis(2));
        assert_eq!(controller.driver().last, before);
    }

    #[test]
    fn credentials_rejected_when_connected() {
        let mut controller = connected();
        assert_eq!(
            controller.submit_credentials("other", "pass"),
            Err(DeviceError::NotAvailable)
        );
        assert_eq!(controller.pending_restart(), None);
    }
}
