//! Guidance phase machine and steering law.
//!
//! Turns the current phase and aim point into a turn-rate-limited flight
//! direction, the thrust vector, and the post-acceleration velocity
//! correction. Everything here is a pure function of its inputs.

use glam::DQuat;

use intercept_core::components::{Body, Interceptor};
use intercept_core::constants::*;
use intercept_core::enums::GuidancePhase;
use intercept_core::profile::ConstantsProfile;
use intercept_core::types::{direction, direction_or, Vec3, UP};

// ---- Phase machine ----

/// Advance the guidance phase for flight time `now - launch_time`.
///
/// Rules, first match wins:
/// 1. flight time < boostTime: BOOST
/// 2. not yet turned and flight time >= turnDelay: MIDCOURSE (sets `turn_started`)
/// 3. turned and `distance` < terminalDistance: TERMINAL
///
/// The phase never moves backward. Returns `(from, to)` when it changed.
pub fn update_phase(
    interceptor: &mut Interceptor,
    now: f64,
    distance: f64,
    terminal_distance: f64,
) -> Option<(GuidancePhase, GuidancePhase)> {
    let flight_time = now - interceptor.launch_time;
    let proposed = if flight_time < interceptor.boost_time {
        GuidancePhase::Boost
    } else if !interceptor.turn_started && flight_time >= interceptor.turn_delay {
        interceptor.turn_started = true;
        GuidancePhase::Midcourse
    } else if interceptor.turn_started && distance < terminal_distance {
        GuidancePhase::Terminal
    } else {
        interceptor.phase
    };

    let next = proposed.max(interceptor.phase);
    if next == interceptor.phase {
        return None;
    }
    let from = interceptor.phase;
    interceptor.phase = next;
    interceptor.phase_change_time = now;
    Some((from, next))
}

// ---- Line of sight ----

/// Angular rate of the line of sight: |previous x current| / dt.
pub fn los_rate(previous: Vec3, current: Vec3, dt: f64) -> f64 {
    if dt <= 0.0 {
        return 0.0;
    }
    previous.cross(current).length() / dt
}

/// Unit vector perpendicular to the current LOS, pointing the way the LOS
/// is rotating: (previous x current) x current. `None` while the LOS is still.
pub fn pn_axis(previous: Vec3, current: Vec3) -> Option<Vec3> {
    direction(previous.cross(current).cross(current))
}

// ---- Turn limiting ----

/// Per-tick turn cap (radians):
/// clamp(maneuverability * dt * aggressiveness * turnSmoothingFactor, minTurnRate, maxTurnRate).
pub fn turn_limit(
    maneuverability: f64,
    dt: f64,
    aggressiveness: f64,
    profile: &ConstantsProfile,
) -> f64 {
    (maneuverability * dt * aggressiveness * profile.turn_smoothing_factor)
        .max(profile.min_turn_rate)
        .min(profile.max_turn_rate)
}

/// Rotate `current` toward `desired` by at most `max_angle` radians about
/// `current x desired`. Returns a unit vector.
pub fn steer_towards(current: Vec3, desired: Vec3, max_angle: f64) -> Vec3 {
    let Some(desired) = direction(desired) else {
        return direction_or(current, UP);
    };
    let Some(current) = direction(current) else {
        return desired;
    };
    let angle = current.dot(desired).clamp(-1.0, 1.0).acos();
    if angle <= max_angle {
        return desired;
    }
    // Antiparallel vectors have no unique axis; any perpendicular one will do.
    let axis = direction(current.cross(desired)).unwrap_or_else(|| current.any_orthonormal_vector());
    direction_or(DQuat::from_axis_angle(axis, max_angle) * current, desired)
}

/// Phase-specific aggressiveness.
pub fn aggressiveness(phase: GuidancePhase, profile: &ConstantsProfile) -> f64 {
    match phase {
        GuidancePhase::Boost => 1.0,
        GuidancePhase::Midcourse => profile.midcourse_aggressiveness,
        GuidancePhase::Terminal => profile.terminal_aggressiveness,
    }
}

// ---- Desired direction ----

/// Midcourse aim: direction to the target blended 70% toward a short-horizon
/// lead point, target + v_target * 0.8 * time-to-go.
pub fn midcourse_direction(interceptor: &Interceptor, target: &Body) -> Vec3 {
    let position = interceptor.body.position;
    let to_aim = interceptor.aim_point - position;
    let relative_velocity = target.velocity - interceptor.body.velocity;
    let time_to_go = to_aim.length() / relative_velocity.length().max(MIDCOURSE_MIN_RELATIVE_SPEED);

    let lead_point = target.position + target.velocity * (MIDCOURSE_LEAD_TIME_FACTOR * time_to_go);
    let lead_dir = direction_or(lead_point - position, UP);
    let direct = direction_or(target.position - position, lead_dir);
    direction_or(direct.lerp(lead_dir, MIDCOURSE_LEAD_WEIGHT), lead_dir)
}

/// Terminal aim: direct bearing blended with a proportional-navigation
/// correction of the current heading. The PN weight is
/// min(1, distance / terminalDistance), so the direct bearing dominates up close.
pub fn terminal_direction(
    interceptor: &Interceptor,
    target: &Body,
    axis: Option<Vec3>,
    los_rate: f64,
    profile: &ConstantsProfile,
    dt: f64,
) -> Vec3 {
    let to_target = target.position - interceptor.body.position;
    let distance = to_target.length();
    let direct = direction_or(to_target, direction_or(interceptor.body.velocity, UP));
    let heading = direction_or(interceptor.body.velocity, direct);

    let relative_velocity = target.velocity - interceptor.body.velocity;
    let magnitude = interceptor.navigation_constant * relative_velocity.length() * los_rate;
    let close_range = profile.close_range;
    let boost = if close_range > 0.0 && distance < close_range {
        1.0 + (close_range - distance) / close_range
    } else {
        1.0
    };
    let pn_dir = match axis {
        Some(axis) => direction_or(heading + axis * (magnitude * boost * dt), heading),
        None => heading,
    };

    let weight = if profile.terminal_distance > 0.0 {
        (distance / profile.terminal_distance).min(1.0)
    } else {
        1.0
    };
    direction_or(direct.lerp(pn_dir, weight), direct)
}

/// Commanded flight direction for this tick.
pub fn desired_direction(
    interceptor: &Interceptor,
    target: &Body,
    axis: Option<Vec3>,
    los_rate: f64,
    profile: &ConstantsProfile,
    dt: f64,
) -> Vec3 {
    let aim = match interceptor.phase {
        GuidancePhase::Boost => return UP,
        GuidancePhase::Midcourse => midcourse_direction(interceptor, target),
        GuidancePhase::Terminal => {
            terminal_direction(interceptor, target, axis, los_rate, profile, dt)
        }
    };
    let limit = turn_limit(
        interceptor.maneuverability,
        dt,
        aggressiveness(interceptor.phase, profile),
        profile,
    );
    steer_towards(interceptor.body.velocity, aim, limit)
}

// ---- Forces ----

/// Thrust acceleration: heading lerped toward `steering` by
/// thrustDirectionFactor, scaled by thrust / mass.
pub fn thrust_acceleration(
    velocity: Vec3,
    steering: Vec3,
    thrust: f64,
    mass: f64,
    profile: &ConstantsProfile,
) -> Vec3 {
    if mass <= 0.0 {
        return Vec3::ZERO;
    }
    let heading = direction_or(velocity, steering);
    let thrust_dir = direction_or(
        heading.lerp(steering, profile.thrust_direction_factor),
        steering,
    );
    thrust_dir * (thrust / mass)
}

/// Post-acceleration heading correction toward `steering`, preserving speed.
/// No-op during BOOST.
pub fn correct_velocity(
    velocity: Vec3,
    steering: Vec3,
    phase: GuidancePhase,
    maneuverability: f64,
    distance: f64,
    profile: &ConstantsProfile,
    dt: f64,
) -> Vec3 {
    if phase == GuidancePhase::Boost {
        return velocity;
    }
    let Some(heading) = direction(velocity) else {
        return velocity;
    };
    let speed = velocity.length();
    let turn = (maneuverability * dt * (1.0 + aggressiveness(phase, profile) / 10.0))
        .min(CORRECTION_MAX_TURN);
    let range_boost = if distance < CORRECTION_BOOST_RANGE {
        (CORRECTION_BOOST_RANGE - distance) / CORRECTION_BOOST_RANGE
    } else {
        0.0
    };
    let rate = profile.velocity_adjustment_rate * (1.0 + range_boost);
    direction_or(heading.lerp(steering, rate * turn), heading) * speed
}
