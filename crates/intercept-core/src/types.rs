//! Fundamental geometric and simulation types.
//!
//! Positions are meters in a right-handed Cartesian frame with Y up.
//! The ground plane is y = 0.

use serde::{Deserialize, Serialize};

pub use glam::DVec3 as Vec3;

/// World "up" (+Y).
pub const UP: Vec3 = Vec3::Y;

/// Vector lengths at or below this are treated as zero.
pub const EPSILON: f64 = 1e-9;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of advanced (unpaused) ticks.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Unit vector along `v`, or `None` if `v` is zero-length or not finite.
pub fn direction(v: Vec3) -> Option<Vec3> {
    let len = v.length();
    if len.is_finite() && len > EPSILON {
        Some(v / len)
    } else {
        None
    }
}

/// Unit vector along `v`, or `fallback` when `v` has no direction.
pub fn direction_or(v: Vec3, fallback: Vec3) -> Vec3 {
    direction(v).unwrap_or(fallback)
}

/// Angle between two vectors in radians. Degenerate inputs give 0.
pub fn angle_between(a: Vec3, b: Vec3) -> f64 {
    match (direction(a), direction(b)) {
        (Some(a), Some(b)) => a.dot(b).clamp(-1.0, 1.0).acos(),
        _ => 0.0,
    }
}

/// Display orientation for a body moving with `velocity`.
/// Bodies slower than 0.1 m/s are shown pointing up.
pub fn orientation(velocity: Vec3) -> Vec3 {
    if velocity.length() < 0.1 {
        UP
    } else {
        direction_or(velocity, UP)
    }
}

/// Horizontal (x/z) distance between two points.
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f64 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}
