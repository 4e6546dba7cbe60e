//! Intercept-point prediction.
//!
//! Two interchangeable algorithms produce an aim point for an interceptor:
//! - **Trajectory**: iteratively propagates the target through drag and
//!   gravity until the interceptor's estimated time of flight converges.
//! - **Lead**: solves the constant-velocity collision quadratic once.
//!
//! Both are pure apart from the shared density cache.

use intercept_core::components::{Body, Interceptor};
use intercept_core::constants::*;
use intercept_core::enums::InterceptType;
use intercept_core::profile::ConstantsProfile;
use intercept_core::types::{direction, Vec3, EPSILON};

use crate::atmosphere::Atmosphere;
use crate::kinematics;

/// Aim point together with the time-of-flight it assumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub aim_point: Vec3,
    /// Estimated seconds until intercept (0 when no solution exists).
    pub time_to_go: f64,
}

/// Read-only inputs shared by every prediction in a tick.
#[derive(Debug, Clone, Copy)]
pub struct PredictionContext<'a> {
    pub profile: &'a ConstantsProfile,
    pub kill_radius: f64,
    /// Speed assumed for an interceptor that is not moving yet.
    pub launch_speed: f64,
}

/// Run the selected predictor.
pub fn predict(
    kind: InterceptType,
    interceptor: &Interceptor,
    target: &Body,
    ctx: &PredictionContext,
    atmosphere: &mut Atmosphere,
) -> Prediction {
    match kind {
        InterceptType::Trajectory => predict_trajectory(interceptor, target, ctx.profile, atmosphere),
        InterceptType::Lead => predict_lead(&interceptor.body, target, ctx),
    }
}

/// Iterative drag-aware prediction.
///
/// The time-of-flight guess starts at `distance / max(speed, 100)` and is
/// refined at most 15 times, damping each update by averaging, until two
/// successive estimates agree within 0.05 s. The aim point is then placed
/// `trajectoryLeadFactor` of the way from the target's current position to
/// its propagated position.
pub fn predict_trajectory(
    interceptor: &Interceptor,
    target: &Body,
    profile: &ConstantsProfile,
    atmosphere: &mut Atmosphere,
) -> Prediction {
    let origin = interceptor.body.position;
    let speed = interceptor.body.velocity.length();
    let mut t = target.position.distance(origin) / speed.max(MIN_PREDICTION_SPEED);

    for _ in 0..TRAJECTORY_MAX_ITERATIONS {
        let future = propagate_ballistic(target, t, profile, atmosphere);
        let avg_speed = average_speed(interceptor, speed, t);
        if avg_speed <= EPSILON {
            break;
        }
        let next = future.distance(origin) / avg_speed;
        if !next.is_finite() || (t - next).abs() < TRAJECTORY_CONVERGENCE_SECS {
            break;
        }
        t = 0.5 * (t + next);
    }

    let future = propagate_ballistic(target, t, profile, atmosphere);
    Prediction {
        aim_point: target.position + (future - target.position) * profile.trajectory_lead_factor,
        time_to_go: t,
    }
}

/// Mean interceptor speed over the next `t` seconds, with thrust acting for
/// the part of `t` covered by the remaining burn.
fn average_speed(interceptor: &Interceptor, speed: f64, t: f64) -> f64 {
    let thrust_accel = if interceptor.body.mass > 0.0 {
        interceptor.thrust / interceptor.body.mass
    } else {
        0.0
    };
    let burn = t.min(interceptor.burn_remaining.max(0.0));
    let final_speed = speed + thrust_accel * burn;
    0.5 * (speed + final_speed)
}

/// Target position after `t` seconds of unpowered flight, in 30 equal
/// sub-steps. Stops on ground contact with the position clamped to y = 0.
pub fn propagate_ballistic(
    target: &Body,
    t: f64,
    profile: &ConstantsProfile,
    atmosphere: &mut Atmosphere,
) -> Vec3 {
    let mut body = *target;
    let dt = t.max(0.0) / TRAJECTORY_SUBSTEPS as f64;
    for _ in 0..TRAJECTORY_SUBSTEPS {
        let rho = atmosphere.density(body.position.y, profile);
        kinematics::integrate(&mut body, Vec3::ZERO, profile.gravity, rho, dt);
        if body.position.y <= 0.0 {
            body.position.y = 0.0;
            break;
        }
    }
    body.position
}

/// Closed-form lead prediction.
///
/// Solves `|R + V t| = s t` with R the relative position, V the relative
/// velocity (target minus interceptor) and s the interceptor speed. Without a
/// real root the target's current position is returned.
pub fn predict_lead(interceptor: &Body, target: &Body, ctx: &PredictionContext) -> Prediction {
    let mut speed = interceptor.velocity.length();
    if speed <= EPSILON {
        speed = if ctx.launch_speed > 0.0 { ctx.launch_speed } else { 1.0 };
    }
    let direct = Prediction {
        aim_point: target.position,
        time_to_go: 0.0,
    };

    let r = target.position - interceptor.position;
    let v = target.velocity - interceptor.velocity;
    let a = v.length_squared() - speed * speed;
    let b = 2.0 * r.dot(v);
    let c = r.length_squared();

    let t = if a.abs() < LEAD_QUADRATIC_EPSILON {
        if b.abs() < LEAD_QUADRATIC_EPSILON {
            return direct;
        }
        -c / b
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return direct;
        }
        let root = discriminant.sqrt();
        let t1 = (-b + root) / (2.0 * a);
        let t2 = (-b - root) / (2.0 * a);
        t1.max(t2).max(0.0)
    };
    let t = t.max(LEAD_MIN_TIME_SECS);
    let lead = Prediction {
        aim_point: target.position + target.velocity * t,
        time_to_go: t,
    };

    if speed < target.velocity.length() * ctx.profile.speed_threshold_factor {
        // Cannot outrun the target: commit to the lead point.
        return lead;
    }
    if r.length() < CLOSE_HOMING_RADIUS_FACTOR * ctx.kill_radius {
        return direct;
    }
    lead
}

/// Predicted interceptor path: 100 steps over 10 s of drag, gravity and
/// thrust toward `aim_point` while burn remains. Ends early at ground contact.
pub fn preview_path(
    interceptor: &Interceptor,
    aim_point: Vec3,
    profile: &ConstantsProfile,
    atmosphere: &mut Atmosphere,
) -> Vec<Vec3> {
    let dt = PREVIEW_HORIZON_SECS / PREVIEW_STEPS as f64;
    let thrust_accel = if interceptor.body.mass > 0.0 {
        interceptor.thrust / interceptor.body.mass
    } else {
        0.0
    };
    let mut body = interceptor.body;
    let mut burn = interceptor.burn_remaining;
    let mut path = Vec::with_capacity(PREVIEW_STEPS + 1);
    path.push(body.position);

    for _ in 0..PREVIEW_STEPS {
        let rho = atmosphere.density(body.position.y, profile);
        let thrust = if burn > 0.0 {
            burn -= dt;
            direction(aim_point - body.position).unwrap_or(Vec3::ZERO) * thrust_accel
        } else {
            Vec3::ZERO
        };
        kinematics::integrate(&mut body, thrust, profile.gravity, rho, dt);
        if body.position.y <= 0.0 {
            body.position.y = 0.0;
            path.push(body.position);
            break;
        }
        path.push(body.position);
    }
    path
}
