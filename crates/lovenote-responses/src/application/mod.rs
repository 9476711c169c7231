//! Application layer for the Response Recording context.

pub mod command_handlers;
