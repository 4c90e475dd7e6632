//! Fire simulation (mode 9)
//!
//! One heat cell per pixel. Each step cools every cell, lets heat drift
//! away from the base, and occasionally ignites a spark near the base.

use super::FireParams;
use crate::{
    color::{Rgb, heat_color},
    math8::{qadd8, qsub8},
    random::Random8,
};

/// Sparks land in the first few cells only
const SPARK_ZONE: u8 = 7;
const SPARK_HEAT_MIN: u8 = 160;
const SPARK_HEAT_MAX: u8 = 255;

#[derive(Clone, Debug)]
pub struct FireSimulation<const N: usize> {
    heat: [u8; N],
}

impl<const N: usize> Default for FireSimulation<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FireSimulation<N> {
    pub const fn new() -> Self {
        Self { heat: [0; N] }
    }

    pub fn heat(&self) -> &[u8; N] {
        &self.heat
    }

    /// Advance the simulation by one step.
    #[allow(clippy::cast_possible_truncation)]
    pub fn step(&mut self, params: &FireParams, rng: &mut Random8) {
        let len = u32::try_from(N.max(1)).unwrap_or(u32::MAX);
        let cooling_limit = (u32::from(params.cooling) * 10 / len + 2).min(255) as u8;
        for cell in &mut self.heat {
            *cell = qsub8(*cell, rng.between(0, cooling_limit));
        }

        for k in (2..N).rev() {
            let below = u16::from(self.heat[k - 1]);
            let further = u16::from(self.heat[k - 2]);
            self.heat[k] = ((below + 2 * further) / 3) as u8;
        }

        if u16::from(rng.any()) < params.sparks {
            let y = usize::from(rng.below(SPARK_ZONE));
            if let Some(cell) = self.heat.get_mut(y) {
                *cell = qadd8(*cell, rng.between(SPARK_HEAT_MIN, SPARK_HEAT_MAX));
            }
        }
    }

    /// Map heat onto `leds`, base at pixel 0 unless `reverse` is set.
    pub fn draw(&self, leds: &mut [Rgb; N], reverse: bool) {
        for (j, &heat) in self.heat.iter().enumerate() {
            let pixel = if reverse { N - 1 - j } else { j };
            leds[pixel] = heat_color(heat);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(cooling: u16, sparks: u16) -> FireParams {
        FireParams {
            speed: 25,
            cooling,
            sparks,
            reverse: false,
        }
    }

    #[test]
    fn no_sparks_never_raises_peak_heat() {
        let mut rng = Random8::new(11);
        let mut fire = FireSimulation::<72>::new();
        // seed some heat first
        for _ in 0..20 {
            fire.step(&params(55, 255), &mut rng);
        }
        let mut peak = *fire.heat().iter().max().unwrap();
        for _ in 0..200 {
            fire.step(&params(55, 0), &mut rng);
            let now = *fire.heat().iter().max().unwrap();
            assert!(now <= peak, "peak rose from {} to {}", peak, now);
            peak = now;
        }
    }

    #[test]
    fn zero_cooling_bound_still_cools() {
        let mut rng = Random8::new(5);
        let mut fire = FireSimulation::<4>::new();
        fire.heat = [10; 4];
        fire.step(&params(0, 0), &mut rng);
        assert!(fire.heat().iter().all(|&h| h <= 10));
    }

    #[test]
    fn huge_cooling_is_clamped() {
        let mut rng = Random8::new(9);
        let mut fire = FireSimulation::<72>::new();
        fire.step(&params(u16::MAX, 0), &mut rng);
        assert!(fire.heat().iter().all(|&h| h == 0));
    }

    #[test]
    fn reverse_mirrors_the_flame() {
        let mut fire = FireSimulation::<3>::new();
        fire.heat = [255, 0, 0];
        let mut forward = [Rgb::default(); 3];
        let mut backward = [Rgb::default(); 3];
        fire.draw(&mut forward, false);
        fire.draw(&mut backward, true);
        assert_eq!(forward[0], heat_color(255));
        assert_eq!(backward[2], heat_color(255));
        assert_eq!(backward[0], Rgb::default());
    }
}
