//! Animation Engine - per-mode render orchestrator
//!
//! The `AnimationEngine` owns:
//! - the pixel buffer the strip is flushed from
//! - per-mode progress (hues, palette offset, fire heat map)
//! - one virtual timer per mode
//! - the random source for stochastic effects
//!
//! Switching to a different mode clears the buffer and restarts the
//! incoming mode's timer; progress variables survive the switch.

use embassy_time::{Duration, Instant};
use smart_leds::hsv::{Hsv, hsv2rgb};

use crate::{
    color::{CONFIGURING_PALETTE, CYAN_PALETTE, GradientPalette, Rgb, fade_to_black_by},
    effect::{
        EffectParams, FireSimulation, beat_color, beat_palette, fill_rainbow, fill_solid,
        fill_solid_hue, fill_spread, period, push_chase, rainbow_step, saturate8, sparkle,
        spread_step,
    },
    mode::ModeId,
    random::Random8,
    timer::ModeTimers,
};

/// Lower bound of the random value used by the chase effect
const CHASE_VALUE_MIN: u8 = 100;
const CHASE_VALUE_MAX: u8 = 255;

/// Progress carried between frames. Not persisted.
#[derive(Clone, Debug)]
pub struct AnimationState<const N: usize> {
    pub full_rainbow_hue: u8,
    pub animated_rainbow_hue: u8,
    pub palette_index: u8,
    pub fire: FireSimulation<N>,
}

impl<const N: usize> Default for AnimationState<N> {
    fn default() -> Self {
        Self {
            full_rainbow_hue: 0,
            animated_rainbow_hue: 0,
            palette_index: 0,
            fire: FireSimulation::new(),
        }
    }
}

/// Animation engine over a strip of `N` pixels
pub struct AnimationEngine<const N: usize> {
    frame: [Rgb; N],
    state: AnimationState<N>,
    timers: ModeTimers,
    rng: Random8,
    /// Time base for beat effects
    epoch: Instant,
    /// Mode rendered by the previous `render` call
    active: Option<ModeId>,
}

impl<const N: usize> AnimationEngine<N> {
    /// Create an engine with a dark frame.
    ///
    /// `epoch` is the zero point for beat-synced modes, usually boot time.
    pub fn new(seed: u64, epoch: Instant) -> Self {
        Self {
            frame: [Rgb::default(); N],
            state: AnimationState::default(),
            timers: ModeTimers::new(),
            rng: Random8::new(seed),
            epoch,
            active: None,
        }
    }

    /// Current pixel buffer
    pub fn frame(&self) -> &[Rgb; N] {
        &self.frame
    }

    pub fn state(&self) -> &AnimationState<N> {
        &self.state
    }

    /// Mode rendered most recently, if any
    pub fn active_mode(&self) -> Option<ModeId> {
        self.active
    }

    /// Blank the pixel buffer.
    pub fn clear(&mut self) {
        self.frame = [Rgb::default(); N];
    }

    /// Render one step of `mode`.
    pub fn render(&mut self, mode: ModeId, params: &EffectParams, now: Instant) {
        if self.active != Some(mode) {
            self.clear();
            self.timers.get_mut(mode).restart(now);
            self.active = Some(mode);
        }

        match mode {
            ModeId::StaticRainbow => {
                fill_rainbow(&mut self.frame, 0, spread_step(N));
            }
            ModeId::FullRainbow => {
                fill_solid_hue(&mut self.frame, self.state.full_rainbow_hue);
                if self.timers.ready(mode, now, period(params.full_rainbow_speed)) {
                    self.state.full_rainbow_hue = self.state.full_rainbow_hue.wrapping_add(1);
                }
            }
            ModeId::AnimatedRainbow => {
                rainbow_step(&mut self.frame, self.state.animated_rainbow_hue);
                if self.timers.ready(mode, now, period(params.animated_rainbow_speed)) {
                    self.state.animated_rainbow_hue =
                        self.state.animated_rainbow_hue.wrapping_add(1);
                }
            }
            ModeId::RandomChase => {
                if self.timers.ready(mode, now, period(params.chase.speed)) {
                    let color = hsv2rgb(Hsv {
                        hue: saturate8(params.chase.hue),
                        sat: self.rng.any(),
                        val: self.rng.between(CHASE_VALUE_MIN, CHASE_VALUE_MAX),
                    });
                    push_chase(&mut self.frame, color);
                }
            }
            ModeId::StaticPalette => {
                fill_spread(&mut self.frame, &CYAN_PALETTE, 0);
            }
            ModeId::AnimatedPalette => {
                self.animated_palette(&CYAN_PALETTE, params, now);
            }
            ModeId::Sparkle => {
                if self.timers.ready(mode, now, period(params.sparkle.speed)) {
                    sparkle(&mut self.frame, &CYAN_PALETTE, &mut self.rng);
                }
                fade_to_black_by(&mut self.frame, saturate8(params.sparkle.fade));
            }
            ModeId::BeatColor => {
                let elapsed = self.elapsed(now);
                beat_color(&mut self.frame, &params.beat, elapsed);
            }
            ModeId::BeatPalette => {
                let elapsed = self.elapsed(now);
                beat_palette(&mut self.frame, &CYAN_PALETTE, elapsed);
            }
            ModeId::Fire => {
                if self.timers.ready(mode, now, period(params.fire.speed)) {
                    self.state.fire.step(&params.fire, &mut self.rng);
                    self.state.fire.draw(&mut self.frame, params.fire.reverse);
                }
            }
            ModeId::StaticColor => {
                fill_solid(&mut self.frame, params.static_color);
            }
        }
    }

    /// Render one step of the "waiting for credentials" animation.
    ///
    /// Shares the scrolling index and timer of the animated palette mode.
    pub fn render_configuring(&mut self, params: &EffectParams, now: Instant) {
        self.animated_palette(&CONFIGURING_PALETTE, params, now);
    }

    fn animated_palette(&mut self, palette: &GradientPalette, params: &EffectParams, now: Instant) {
        fill_spread(&mut self.frame, palette, self.state.palette_index);
        let ready = self.timers.ready(
            ModeId::AnimatedPalette,
            now,
            period(params.animated_palette_speed),
        );
        if ready {
            self.state.palette_index = self.state.palette_index.wrapping_add(1);
        }
    }

    fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.epoch)
    }
}
