//! Per-tick systems operating on the engine's bodies.
//!
//! Systems are plain functions over the state they are handed. They do not
//! own state.

pub mod flight;
pub mod snapshot;
pub mod target;
