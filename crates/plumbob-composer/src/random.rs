use fastrand::Rng;

/// 8-bit random source for effects.
///
/// Mirrors the `random8` family: empty ranges collapse to their lower
/// bound instead of panicking.
#[derive(Clone, Debug)]
pub struct Random8 {
    rng: Rng,
}

impl Random8 {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }

    /// Uniform value in `0..=255`
    pub fn any(&mut self) -> u8 {
        self.rng.u8(..)
    }

    /// Uniform value in `0..limit`, or 0 when `limit` is 0
    pub fn below(&mut self, limit: u8) -> u8 {
        if limit == 0 {
            return 0;
        }
        self.rng.u8(..limit)
    }

    /// Uniform value in `low..high`, or `low` when the range is empty
    pub fn between(&mut self, low: u8, high: u8) -> u8 {
        if high <= low {
            return low;
        }
        self.rng.u8(low..high)
    }

    /// Uniform index in `0..len`, or 0 when `len` is 0
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.usize(..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ranges_do_not_panic() {
        let mut rng = Random8::new(7);
        assert_eq!(rng.below(0), 0);
        assert_eq!(rng.between(9, 9), 9);
        assert_eq!(rng.between(200, 100), 200);
        assert_eq!(rng.index(0), 0);
    }

    #[test]
    fn bounded_draws_stay_in_bounds() {
        let mut rng = Random8::new(42);
        for _ in 0..1000 {
            assert!(rng.below(7) < 7);
            let v = rng.between(160, 255);
            assert!((160..255).contains(&v));
            assert!(rng.index(72) < 72);
        }
    }
}
