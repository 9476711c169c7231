//! Application layer: the scene sequencer.

pub mod sequencer;
