//! Domain layer for the Response Recording context.

pub mod commands;
