//! Simulation engine for ballistic intercepts.
//!
//! Owns the target, the interceptors and the clock, steps flight dynamics and
//! guidance once per frame, and produces `SimSnapshot`s. Completely headless,
//! so a fixed seed and frame sequence replays exactly.

pub mod atmosphere;
pub mod classifier;
pub mod engine;
pub mod guidance;
pub mod kinematics;
pub mod launch;
pub mod prediction;
pub mod systems;

pub use engine::SimulationEngine;
pub use intercept_core as core;

#[cfg(test)]
mod tests;
