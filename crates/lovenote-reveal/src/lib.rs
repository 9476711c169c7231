//! Lovenote reveal animations.
//!
//! Responsible for the ordered, timed reveal of text glyphs and pixel-art
//! cells, and for the built-in artwork those reveals draw.

pub mod application;
pub mod domain;
