//! The timer-driven animator that walks a reveal target.

pub mod animator;
