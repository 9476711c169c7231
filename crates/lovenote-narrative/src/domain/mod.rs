//! Domain model for the narrative.

pub mod commands;
pub mod events;
pub mod notice;
pub mod scene;
pub mod script;
pub mod state;
