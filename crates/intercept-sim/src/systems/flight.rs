//! Interceptor flight for one tick.
//!
//! Order per interceptor: phase update, rate-limited aim refresh, path
//! preview refresh, line of sight, steering, thrust and drag, guidance
//! correction, position update, trail. Classification runs afterwards in the
//! engine.

use intercept_core::components::{Body, Interceptor};
use intercept_core::constants::TRAIL_INTERVAL_SECS;
use intercept_core::enums::{GuidancePhase, InterceptType};
use intercept_core::profile::ConstantsProfile;
use intercept_core::types::{direction, Vec3};

use crate::atmosphere::Atmosphere;
use crate::guidance;
use crate::kinematics;
use crate::prediction::{self, PredictionContext};

/// Everything an interceptor step reads, plus the shared density cache.
pub struct FlightContext<'a> {
    pub profile: &'a ConstantsProfile,
    pub atmosphere: &'a mut Atmosphere,
    pub intercept_type: InterceptType,
    pub kill_radius: f64,
    /// Configured launch speed, used by the lead predictor at rest.
    pub launch_speed: f64,
    /// Sim time after this tick's advance.
    pub now: f64,
    pub dt: f64,
}

impl<'a> FlightContext<'a> {
    fn prediction(&self) -> PredictionContext<'a> {
        PredictionContext {
            profile: self.profile,
            kill_radius: self.kill_radius,
            launch_speed: self.launch_speed,
        }
    }
}

/// Refresh the aim point now, regardless of the update interval.
pub fn refresh_aim(ctx: &mut FlightContext, interceptor: &mut Interceptor, target: &Body) {
    let pctx = ctx.prediction();
    let prediction =
        prediction::predict(ctx.intercept_type, interceptor, target, &pctx, ctx.atmosphere);
    interceptor.aim_point = prediction.aim_point;
    interceptor.last_aim_update = ctx.now;
}

/// Recompute the predicted path toward the current aim point.
pub fn refresh_preview(ctx: &mut FlightContext, interceptor: &mut Interceptor) {
    interceptor.predicted_path =
        prediction::preview_path(interceptor, interceptor.aim_point, ctx.profile, ctx.atmosphere);
    interceptor.last_preview_time = ctx.now;
}

/// Fly `interceptor` for one tick against `target`.
/// Returns the phase transition, if one happened.
pub fn step(
    ctx: &mut FlightContext,
    interceptor: &mut Interceptor,
    target: &Body,
) -> Option<(GuidancePhase, GuidancePhase)> {
    let (now, dt) = (ctx.now, ctx.dt);
    let distance = interceptor.body.position.distance(target.position);

    let transition =
        guidance::update_phase(interceptor, now, distance, ctx.profile.terminal_distance);

    if now - interceptor.last_aim_update >= interceptor.update_interval {
        refresh_aim(ctx, interceptor, target);
    }
    if now - interceptor.last_preview_time >= ctx.profile.prediction_update_interval {
        refresh_preview(ctx, interceptor);
    }

    // Line of sight; coincident bodies keep the previous one.
    let (axis, los_rate) = match direction(target.position - interceptor.body.position) {
        Some(current) => {
            let previous = interceptor.last_los.unwrap_or(current);
            interceptor.last_los = Some(current);
            (
                guidance::pn_axis(previous, current),
                guidance::los_rate(previous, current, dt),
            )
        }
        None => (None, 0.0),
    };
    interceptor.los_rate = los_rate;

    let steering =
        guidance::desired_direction(interceptor, target, axis, los_rate, ctx.profile, dt);
    interceptor.steering_direction = steering;

    let thrust = if interceptor.burn_remaining > 0.0 {
        interceptor.burn_remaining = (interceptor.burn_remaining - dt).max(0.0);
        guidance::thrust_acceleration(
            interceptor.body.velocity,
            steering,
            interceptor.thrust,
            interceptor.body.mass,
            ctx.profile,
        )
    } else {
        Vec3::ZERO
    };

    let rho = ctx.atmosphere.density(interceptor.body.position.y, ctx.profile);
    kinematics::accelerate(&mut interceptor.body, thrust, ctx.profile.gravity, rho, dt);
    interceptor.body.velocity = guidance::correct_velocity(
        interceptor.body.velocity,
        steering,
        interceptor.phase,
        interceptor.maneuverability,
        distance,
        ctx.profile,
        dt,
    );
    kinematics::translate(&mut interceptor.body, dt);

    if now - interceptor.last_trail_time >= TRAIL_INTERVAL_SECS {
        interceptor.trail.push(interceptor.body.position);
        interceptor.last_trail_time = now;
    }

    transition
}
