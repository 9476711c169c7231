//! Test RNG: deterministic `DeterministicRng` implementations for tests.

use lovenote_core::rng::DeterministicRng;

/// An RNG that always returns `min` for `next_u32_range` and `0.5` for
/// `next_f64`. Suitable for tests that do not depend on specific random values.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.5
    }
}

/// An RNG that returns values from a predetermined sequence of unit-interval
/// floats. Panics if the sequence is exhausted. Used in tests that need
/// specific, repeatable decoy positions.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values, each in `[0.0, 1.0)`.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }

    /// Number of values handed out so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl DeterministicRng for SequenceRng {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let span = f64::from(max.saturating_sub(min)) + 1.0;
        let offset = (self.next_f64() * span) as u32;
        min + offset.min(max.saturating_sub(min))
    }

    fn next_f64(&mut self) -> f64 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }
}
