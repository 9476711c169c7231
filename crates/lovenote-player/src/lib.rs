//! Lovenote terminal player.
//!
//! Plays a narrative script in the terminal: typewriter text, pixel art drawn
//! cell by cell, the accept/decline question and a confetti finale. The
//! answer is posted to the response API.

pub mod app;
pub mod config;
pub mod confetti;
pub mod error;
pub mod http;
pub mod render;
