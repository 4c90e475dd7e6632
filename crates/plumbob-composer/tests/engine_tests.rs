//! Integration tests for the animation engine and output path.

use embassy_time::Instant;
use plumbob_composer::{
    AnimationEngine, ColorCorrection, EffectParams, LedDriver, ModeId, OutputProcessor, Rgb,
    color::{CYAN_PALETTE, heat_color},
    processor::TYPICAL_PIXEL_STRING,
};

const N: usize = 72;

fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

struct RecordingDriver {
    frames: usize,
    last: [Rgb; N],
}

impl RecordingDriver {
    fn new() -> Self {
        Self {
            frames: 0,
            last: [Rgb::default(); N],
        }
    }
}

impl LedDriver<N> for RecordingDriver {
    fn write(&mut self, colors: &[Rgb; N]) {
        self.frames += 1;
        self.last = *colors;
    }
}

// -----------------------------------------------------------------------------
// Every mode renders
// -----------------------------------------------------------------------------

#[test]
fn every_mode_renders_for_a_while() {
    let params = EffectParams::default();
    let mut raw = 0u8;
    while let Some(mode) = ModeId::from_raw(raw) {
        let mut engine = AnimationEngine::<N>::new(u64::from(raw), at(0));
        for ms in 0..500 {
            engine.render(mode, &params, at(ms));
        }
        assert_eq!(engine.active_mode(), Some(mode));
        raw += 1;
    }
    assert_eq!(usize::from(raw), ModeId::COUNT);
}

#[test]
fn static_rainbow_is_stable() {
    let params = EffectParams::default();
    let mut engine = AnimationEngine::<N>::new(0, at(0));
    engine.render(ModeId::StaticRainbow, &params, at(0));
    let first = *engine.frame();
    engine.render(ModeId::StaticRainbow, &params, at(10_000));
    assert_eq!(*engine.frame(), first);
    assert_ne!(first[0], first[36]);
}

#[test]
fn static_palette_spans_the_strip() {
    let params = EffectParams::default();
    let mut engine = AnimationEngine::<N>::new(0, at(0));
    engine.render(ModeId::StaticPalette, &params, at(0));
    assert_eq!(engine.frame()[0], CYAN_PALETTE.sample(0));
    assert_eq!(engine.frame()[1], CYAN_PALETTE.sample(3));
}

// -----------------------------------------------------------------------------
// Chase
// -----------------------------------------------------------------------------

#[test]
fn chase_pushes_one_pixel_per_period() {
    let mut params = EffectParams::default();
    params.chase.speed = 10;
    let mut engine = AnimationEngine::<N>::new(3, at(0));

    engine.render(ModeId::RandomChase, &params, at(0));
    engine.render(ModeId::RandomChase, &params, at(10));
    let head = engine.frame()[0];
    assert_ne!(head, Rgb::default());
    assert_eq!(engine.frame()[1], Rgb::default());

    engine.render(ModeId::RandomChase, &params, at(20));
    assert_eq!(engine.frame()[1], head);
}

// -----------------------------------------------------------------------------
// Sparkle and fire
// -----------------------------------------------------------------------------

#[test]
fn sparkle_fades_out_when_no_new_sparks() {
    let mut params = EffectParams::default();
    params.sparkle.speed = 10;
    params.sparkle.fade = 64;
    let mut engine = AnimationEngine::<N>::new(5, at(0));
    engine.render(ModeId::Sparkle, &params, at(0));
    engine.render(ModeId::Sparkle, &params, at(10));
    assert!(engine.frame().iter().any(|p| *p != Rgb::default()));

    // stay inside one period so no new sparkle is added
    for _ in 0..40 {
        engine.render(ModeId::Sparkle, &params, at(15));
    }
    assert!(engine.frame().iter().all(|p| *p == Rgb::default()));
}

#[test]
fn fire_frame_matches_heat_map() {
    let mut params = EffectParams::default();
    params.fire.sparks = 255;
    let mut engine = AnimationEngine::<N>::new(9, at(0));
    let mut ms = 0;
    for _ in 0..50 {
        engine.render(ModeId::Fire, &params, at(ms));
        ms += 25;
    }
    let heat = engine.state().fire.heat();
    for (pixel, &h) in engine.frame().iter().zip(heat.iter()) {
        assert_eq!(*pixel, heat_color(h));
    }
}

#[test]
fn reversed_fire_flips_the_strip() {
    let mut params = EffectParams::default();
    params.fire.sparks = 255;
    params.fire.reverse = true;
    let mut engine = AnimationEngine::<N>::new(9, at(0));
    let mut ms = 0;
    for _ in 0..50 {
        engine.render(ModeId::Fire, &params, at(ms));
        ms += 25;
    }
    let heat = engine.state().fire.heat();
    for (j, &h) in heat.iter().enumerate() {
        assert_eq!(engine.frame()[N - 1 - j], heat_color(h));
    }
}

// -----------------------------------------------------------------------------
// Output path
// -----------------------------------------------------------------------------

#[test]
fn output_applies_brightness_then_correction() {
    let mut params = EffectParams::default();
    params.static_color = Rgb::new(255, 255, 255);
    let mut engine = AnimationEngine::<N>::new(0, at(0));
    engine.render(ModeId::StaticColor, &params, at(0));

    let processor = OutputProcessor::new(128, ColorCorrection::from_rgb(TYPICAL_PIXEL_STRING));
    let mut driver = RecordingDriver::new();
    processor.show(engine.frame(), &mut driver);

    assert_eq!(driver.frames, 1);
    // 255 -> 128 by brightness, then channel factors
    assert_eq!(driver.last[0], Rgb::new(128, 112, 70));
    assert_eq!(engine.frame()[0], Rgb::new(255, 255, 255));
}
