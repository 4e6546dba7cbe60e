//! Point-mass flight integration (semi-implicit Euler).
//!
//! Velocity is updated from the summed acceleration first, then position is
//! advanced with the new velocity. Interceptors split the two halves so the
//! guidance correction can act on velocity before the body moves.

use intercept_core::components::Body;
use intercept_core::constants::MAX_DT;
use intercept_core::types::Vec3;

/// Clamp a frame delta into `[0, MAX_DT]`. Non-finite or negative deltas become 0.
pub fn clamp_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(MAX_DT)
    } else {
        0.0
    }
}

/// Drag deceleration: -0.5 * rho * Cd * A * |v|^2 * v_hat / m.
pub fn drag_acceleration(
    velocity: Vec3,
    density: f64,
    drag_coefficient: f64,
    area: f64,
    mass: f64,
) -> Vec3 {
    let speed = velocity.length();
    if speed < 1e-6 || mass <= 0.0 {
        return Vec3::ZERO;
    }
    // |v|^2 * v_hat == |v| * v
    velocity * (-0.5 * density * drag_coefficient * area * speed / mass)
}

/// Total acceleration on `body`: drag, thrust (already per unit mass) and gravity.
pub fn acceleration(body: &Body, thrust_accel: Vec3, gravity: f64, density: f64) -> Vec3 {
    drag_acceleration(
        body.velocity,
        density,
        body.drag_coefficient,
        body.area,
        body.mass,
    ) + thrust_accel
        + Vec3::new(0.0, -gravity, 0.0)
}

/// Velocity half-step. `dt` is used as given.
pub fn accelerate(body: &mut Body, thrust_accel: Vec3, gravity: f64, density: f64, dt: f64) {
    body.velocity += acceleration(body, thrust_accel, gravity, density) * dt;
}

/// Position half-step with the current velocity.
pub fn translate(body: &mut Body, dt: f64) {
    body.position += body.velocity * dt;
}

/// Full unclamped step. Used by predictors, which choose their own sub-steps.
pub fn integrate(body: &mut Body, thrust_accel: Vec3, gravity: f64, density: f64, dt: f64) {
    accelerate(body, thrust_accel, gravity, density, dt);
    translate(body, dt);
}

/// Full step with `dt` clamped to `MAX_DT`. Returns the step actually taken.
pub fn step(body: &mut Body, thrust_accel: Vec3, gravity: f64, density: f64, dt: f64) -> f64 {
    let dt = clamp_dt(dt);
    integrate(body, thrust_accel, gravity, density, dt);
    dt
}
