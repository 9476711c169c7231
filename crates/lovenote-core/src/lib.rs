//! Lovenote Core: shared abstractions.
//!
//! This crate defines the traits and types that the reveal, narrative,
//! response and front-end crates depend on. It contains no infrastructure
//! code.

pub mod clock;
pub mod effects;
pub mod error;
pub mod event;
pub mod repository;
pub mod response;
pub mod rng;
pub mod submission;
