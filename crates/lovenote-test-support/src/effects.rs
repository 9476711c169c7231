//! Test particle effect: records every celebration.

use std::sync::Mutex;

use lovenote_core::effects::{Intensity, Origin, ParticleEffect};

/// A particle effect that records every `celebrate` call.
#[derive(Debug, Default)]
pub struct RecordingParticleEffect {
    bursts: Mutex<Vec<(Intensity, Origin)>>,
}

impl RecordingParticleEffect {
    /// Create an effect with no recorded bursts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded celebration.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn bursts(&self) -> Vec<(Intensity, Origin)> {
        self.bursts.lock().unwrap().clone()
    }

    /// Number of celebrations at the given intensity.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn count(&self, intensity: Intensity) -> usize {
        self.bursts
            .lock()
            .unwrap()
            .iter()
            .filter(|(i, _)| *i == intensity)
            .count()
    }
}

impl ParticleEffect for RecordingParticleEffect {
    fn celebrate(&self, intensity: Intensity, origin: Origin) {
        self.bursts.lock().unwrap().push((intensity, origin));
    }
}
