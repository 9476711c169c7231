//! Reveal targets, cadence and artwork.

pub mod artwork;
pub mod cadence;
pub mod error;
pub mod target;
