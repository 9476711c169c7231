//! Cosmetic particle effects.
//!
//! Effects are fire-and-forget: nothing they do is reported back to the
//! caller, and implementations must not block.

use serde::{Deserialize, Serialize};

/// How large a celebration should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// A small burst, used when a picture finishes drawing.
    Sparkle,
    /// A long multi-burst display, used when the proposal is accepted.
    Fireworks,
}

/// Where on screen a celebration should appear to originate, in normalized
/// coordinates (`0.0` left/top, `1.0` right/bottom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Origin {
    /// The center of the screen.
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    /// Just below the artwork area.
    pub const BELOW_ARTWORK: Self = Self { x: 0.5, y: 0.7 };
}

/// A particle effect surface.
pub trait ParticleEffect: Send + Sync {
    /// Triggers a celebration. Must return immediately.
    fn celebrate(&self, intensity: Intensity, origin: Origin);
}
