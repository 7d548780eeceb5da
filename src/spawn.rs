//! Random source for particle initialization and wraparound.
//!
//! Wraps a [`SmallRng`] with the handful of sampling helpers the field needs.
//! Seed it explicitly for reproducible runs, or from the clock for the
//! usual decorative use.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Sampling helpers backed by a small, fast RNG.
///
/// All range helpers tolerate empty ranges (`min >= max`) and return `min`,
/// so a zero-sized surface never panics the sampler.
#[derive(Debug, Clone)]
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Deterministic context for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Context seeded from the system clock, different on every run.
    pub fn from_clock() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(seed)
    }

    /// Random f32 in `[min, max)`.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Random f32 in `[0, max)`, or `0.0` when `max` is not positive.
    #[inline]
    pub fn random_below(&mut self, max: f32) -> f32 {
        self.random_range(0.0, max)
    }

    /// Fair coin flip.
    #[inline]
    pub fn random_bool(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// Random point in the rectangle `[0, size.x) x [0, size.y)`.
    pub fn random_in_rect(&mut self, size: Vec2) -> Vec2 {
        Vec2::new(self.random_below(size.x), self.random_below(size.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SpawnContext::seeded(99);
        let mut b = SpawnContext::seeded(99);

        for _ in 0..16 {
            assert_eq!(a.random_range(0.0, 1.0), b.random_range(0.0, 1.0));
        }
    }

    #[test]
    fn test_empty_ranges_do_not_panic() {
        let mut ctx = SpawnContext::seeded(1);

        assert_eq!(ctx.random_range(0.5, 0.5), 0.5);
        assert_eq!(ctx.random_below(0.0), 0.0);
        assert_eq!(ctx.random_in_rect(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_random_in_rect_bounds() {
        let mut ctx = SpawnContext::seeded(7);
        let size = Vec2::new(64.0, 16.0);

        for _ in 0..1000 {
            let p = ctx.random_in_rect(size);
            assert!(p.x >= 0.0 && p.x < size.x);
            assert!(p.y >= 0.0 && p.y < size.y);
        }
    }
}
