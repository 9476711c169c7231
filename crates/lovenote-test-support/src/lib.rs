//! Shared test mocks and utilities for Lovenote.

mod clock;
mod effects;
mod repository;
mod rng;
mod submission;

pub use clock::FixedClock;
pub use effects::RecordingParticleEffect;
pub use repository::{FailingResponseRepository, RecordingResponseRepository};
pub use rng::{MockRng, SequenceRng};
pub use submission::{FailingSubmitter, RecordingSubmitter, StalledSubmitter};
