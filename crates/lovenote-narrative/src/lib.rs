//! Lovenote narrative sequencing.
//!
//! Responsible for the scene script, scene progression gated on reveal
//! completion, and the final accept/decline decision.

pub mod application;
pub mod domain;
