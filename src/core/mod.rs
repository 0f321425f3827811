//! Core model – the scroll-wheel controller and its pure helpers.
//!
//! Nothing in this module depends on any TUI or rendering crate, and nothing
//! here reads a clock: time always comes in from the caller.

pub mod animation;
pub mod combine;
pub mod gesture;
pub mod list;
pub mod physics;
pub mod wheel;
pub mod window;
