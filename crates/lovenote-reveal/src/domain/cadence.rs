//! Reveal cadence: how fast cells appear and how long the finished frame
//! settles before completion is signalled.

use std::time::Duration;

use super::error::RevealError;

/// Step interval and settle delay for a reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealCadence {
    step: Duration,
    settle: Duration,
}

impl RevealCadence {
    /// Typewriter text: one glyph every 50 ms, no settle delay.
    pub const TYPEWRITER: Self = Self {
        step: Duration::from_millis(50),
        settle: Duration::ZERO,
    };

    /// Pixel art: one cell every 50 ms, then 500 ms before completion.
    pub const PIXEL_ART: Self = Self {
        step: Duration::from_millis(50),
        settle: Duration::from_millis(500),
    };

    /// Creates a cadence.
    ///
    /// # Errors
    ///
    /// Returns `RevealError::ZeroStep` if `step` is zero.
    pub fn new(step: Duration, settle: Duration) -> Result<Self, RevealError> {
        if step.is_zero() {
            return Err(RevealError::ZeroStep);
        }
        Ok(Self { step, settle })
    }

    /// Interval between ticks.
    #[must_use]
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Pause between the last tick and completion.
    #[must_use]
    pub fn settle(&self) -> Duration {
        self.settle
    }

    /// Earliest time after `start` at which a target of `total` cells can
    /// complete.
    #[must_use]
    pub fn completion_after(&self, total: usize) -> Duration {
        let ticks = u32::try_from(total).unwrap_or(u32::MAX);
        self.step.saturating_mul(ticks).saturating_add(self.settle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_step() {
        let result = RevealCadence::new(Duration::ZERO, Duration::from_millis(500));

        assert_eq!(result, Err(RevealError::ZeroStep));
    }

    #[test]
    fn test_completion_after_adds_settle_to_ticks() {
        let cadence =
            RevealCadence::new(Duration::from_millis(50), Duration::from_millis(500)).unwrap();

        assert_eq!(cadence.completion_after(2), Duration::from_millis(600));
        assert_eq!(cadence.completion_after(0), Duration::from_millis(500));
    }

    #[test]
    fn test_presets_have_expected_timing() {
        assert_eq!(RevealCadence::TYPEWRITER.step(), Duration::from_millis(50));
        assert_eq!(RevealCadence::TYPEWRITER.settle(), Duration::ZERO);
        assert_eq!(
            RevealCadence::PIXEL_ART.settle(),
            Duration::from_millis(500)
        );
    }
}
