//! Lovenote Response Recording bounded context.
//!
//! Responsible for turning an accept/decline answer into a stored response
//! record. Records are create-only.

pub mod application;
pub mod domain;
