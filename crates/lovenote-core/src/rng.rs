//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. Tests inject a scripted
//! implementation so that decoy motion is repeatable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// Production RNG backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SystemRng(StdRng);

impl SystemRng {
    /// Seeds from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Seeds from a fixed value, giving a reproducible stream.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for SystemRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.0.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = SystemRng::seeded(7);
        let mut b = SystemRng::seeded(7);

        for _ in 0..16 {
            assert_eq!(a.next_u32_range(0, 100), b.next_u32_range(0, 100));
            assert!((a.next_f64() - b.next_f64()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_next_u32_range_stays_in_bounds() {
        let mut rng = SystemRng::seeded(42);

        for _ in 0..256 {
            let value = rng.next_u32_range(3, 9);
            assert!((3..=9).contains(&value));
        }
    }

    #[test]
    fn test_next_u32_range_with_empty_range_returns_min() {
        let mut rng = SystemRng::seeded(1);

        assert_eq!(rng.next_u32_range(5, 5), 5);
        assert_eq!(rng.next_u32_range(9, 2), 9);
    }

    #[test]
    fn test_next_f64_is_unit_interval() {
        let mut rng = SystemRng::seeded(3);

        for _ in 0..256 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value));
        }
    }
}
