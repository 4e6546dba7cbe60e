//! Outcome classification: hit, miss, ground impact, diverging trajectory.
//!
//! Rules are evaluated once per tick on the post-move state, first match wins:
//! 1. proximity (distance < kill radius): probability roll, HIT or MISS
//! 2. ground impact (altitude <= 0)
//! 3. angular miss inside the miss band with a bad bearing angle
//! 4. diverging trajectory after the running minimum separation

use rand::Rng;

use intercept_core::components::{Body, Interceptor};
use intercept_core::constants::*;
use intercept_core::enums::{MissReason, Outcome};
use intercept_core::events::{GuidanceSettings, MissDiagnostic};
use intercept_core::profile::ConstantsProfile;
use intercept_core::types::{angle_between, Vec3};

/// Terminal classification of one interceptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub outcome: Outcome,
    pub diagnostic: Option<MissDiagnostic>,
}

impl Verdict {
    fn plain(outcome: Outcome) -> Self {
        Self {
            outcome,
            diagnostic: None,
        }
    }
}

/// Separation and bearing geometry of one interceptor against the target.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    distance: f64,
    bearing_angle_deg: f64,
    interceptor_speed: f64,
    target_speed: f64,
}

impl Geometry {
    fn measure(interceptor: &Body, target: &Body) -> Self {
        let to_target = target.position - interceptor.position;
        Self {
            distance: to_target.length(),
            bearing_angle_deg: angle_between(interceptor.velocity, to_target).to_degrees(),
            interceptor_speed: interceptor.velocity.length(),
            target_speed: target.velocity.length(),
        }
    }
}

/// Classify `interceptor` against `target`. Updates the running minimum
/// separation as a side effect. Returns `None` while still in flight.
pub fn classify(
    interceptor: &mut Interceptor,
    target: &Body,
    kill_radius: f64,
    profile: &ConstantsProfile,
    rng: &mut impl Rng,
) -> Option<Verdict> {
    let geo = Geometry::measure(&interceptor.body, target);

    // 1. Proximity
    if geo.distance < kill_radius {
        let probability = if geo.bearing_angle_deg > profile.hit_angle_threshold {
            0.0
        } else {
            profile.intercept_probability
        };
        let hit = probability.is_finite() && rng.gen_bool(probability.clamp(0.0, 1.0));
        return Some(Verdict::plain(if hit { Outcome::Hit } else { Outcome::Miss }));
    }

    // 2. Ground impact
    if interceptor.body.position.y <= 0.0 {
        return Some(Verdict::plain(Outcome::Ground));
    }

    // 3. Angular miss
    let miss_distance = profile.miss_distance_multiplier * kill_radius;
    if geo.distance > kill_radius
        && geo.distance < miss_distance
        && geo.bearing_angle_deg > profile.miss_angle_threshold
    {
        let reason = miss_reason(&geo, kill_radius, profile);
        return Some(Verdict {
            outcome: Outcome::Miss,
            diagnostic: Some(diagnose(
                Outcome::Miss,
                reason,
                &geo,
                interceptor,
                kill_radius,
                profile,
            )),
        });
    }

    // 4. Diverging trajectory
    if geo.distance < interceptor.min_distance_to_target {
        interceptor.min_distance_to_target = geo.distance;
    }
    let min_distance = interceptor.min_distance_to_target;
    if interceptor.outcome.is_none()
        && min_distance > kill_radius
        && geo.distance > min_distance + TRAJECTORY_MISS_HYSTERESIS
    {
        let reason = trajectory_reason(&geo, min_distance, kill_radius);
        return Some(Verdict {
            outcome: Outcome::Trajectory,
            diagnostic: Some(diagnose(
                Outcome::Trajectory,
                reason,
                &geo,
                interceptor,
                kill_radius,
                profile,
            )),
        });
    }

    None
}

/// MISS-class verdict for an interceptor whose state or aim point went
/// non-finite. `None` when everything is finite.
pub fn numerical_fault(
    interceptor: &Interceptor,
    target: &Body,
    kill_radius: f64,
    profile: &ConstantsProfile,
) -> Option<Verdict> {
    let body = &interceptor.body;
    if body.position.is_finite() && body.velocity.is_finite() && interceptor.aim_point.is_finite()
    {
        return None;
    }
    let geo = Geometry::measure(body, target);
    Some(Verdict {
        outcome: Outcome::Miss,
        diagnostic: Some(diagnose(
            Outcome::Miss,
            MissReason::NumericalFault,
            &geo,
            interceptor,
            kill_radius,
            profile,
        )),
    })
}

fn miss_reason(geo: &Geometry, kill_radius: f64, profile: &ConstantsProfile) -> MissReason {
    if geo.bearing_angle_deg > profile.miss_angle_threshold {
        MissReason::LargeBearingAngle
    } else if geo.distance > kill_radius * MISS_REASON_DISTANCE_FACTOR {
        MissReason::ExcessiveDistance
    } else if geo.interceptor_speed < geo.target_speed * MISS_REASON_SPEED_FACTOR {
        MissReason::InsufficientSpeed
    } else {
        MissReason::Unspecified
    }
}

fn trajectory_reason(geo: &Geometry, min_distance: f64, kill_radius: f64) -> MissReason {
    if min_distance > kill_radius * MISS_REASON_DISTANCE_FACTOR {
        MissReason::InsufficientClosure
    } else if geo.interceptor_speed < geo.target_speed * MISS_REASON_SPEED_FACTOR {
        MissReason::InsufficientSpeed
    } else {
        MissReason::SuboptimalTrajectory
    }
}

fn diagnose(
    outcome: Outcome,
    reason: MissReason,
    geo: &Geometry,
    interceptor: &Interceptor,
    kill_radius: f64,
    profile: &ConstantsProfile,
) -> MissDiagnostic {
    MissDiagnostic {
        outcome,
        reason,
        distance: geo.distance,
        min_distance: interceptor.min_distance_to_target,
        bearing_angle_deg: geo.bearing_angle_deg,
        miss_angle_threshold_deg: profile.miss_angle_threshold,
        kill_radius,
        miss_distance: profile.miss_distance_multiplier * kill_radius,
        interceptor_speed: geo.interceptor_speed,
        target_speed: geo.target_speed,
        phase: interceptor.phase,
        guidance: GuidanceSettings {
            midcourse_aggressiveness: profile.midcourse_aggressiveness,
            terminal_aggressiveness: profile.terminal_aggressiveness,
            turn_smoothing_factor: profile.turn_smoothing_factor,
            min_turn_rate: profile.min_turn_rate,
            max_turn_rate: profile.max_turn_rate,
            navigation_constant: interceptor.navigation_constant,
            trajectory_lead_factor: profile.trajectory_lead_factor,
        },
    }
}

/// Advisory hit probability for live display. Never used by [`classify`].
///
/// Weighted blend of distance, bearing and closing-speed factors, each
/// clamped to [0, 1], scaled by interceptProbability. Forced to at least 0.95
/// when inside 1.2 kill radii and within 30 degrees, and at most 0.1 beyond
/// 20 kill radii.
pub fn estimate_hit_probability(
    interceptor: &Body,
    target: &Body,
    kill_radius: f64,
    profile: &ConstantsProfile,
) -> f64 {
    let to_target = target.position - interceptor.position;
    let distance = to_target.length();
    let angle_deg = angle_between(interceptor.velocity, to_target).to_degrees();
    let los = intercept_core::types::direction_or(to_target, Vec3::ZERO);
    // Positive while the separation is shrinking.
    let closing_speed = (interceptor.velocity - target.velocity).dot(los);

    let mut probability = if angle_deg > profile.hit_angle_threshold {
        0.0
    } else {
        profile.intercept_probability
    };

    let distance_factor = if profile.terminal_distance > 0.0 {
        (1.0 - distance / (2.0 * profile.terminal_distance)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let angle_factor = if profile.hit_angle_threshold > 0.0 {
        (1.0 - angle_deg / profile.hit_angle_threshold).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closing_span = profile.max_closing_speed - profile.min_closing_speed;
    let speed_factor = if closing_span > 0.0 {
        ((closing_speed - profile.min_closing_speed) / closing_span).clamp(0.0, 1.0)
    } else if closing_speed >= profile.min_closing_speed {
        1.0
    } else {
        0.0
    };

    probability *= distance_factor * profile.distance_weight
        + angle_factor * profile.angle_weight
        + speed_factor * profile.speed_weight;

    if distance < kill_radius * HIT_CHANCE_CLOSE_FACTOR && angle_deg < HIT_CHANCE_CLOSE_ANGLE_DEG {
        probability = probability.max(HIT_CHANCE_CLOSE_FLOOR);
    }
    if distance > kill_radius * HIT_CHANCE_FAR_FACTOR {
        probability = probability.min(HIT_CHANCE_FAR_CEILING);
    }
    probability.clamp(0.0, 1.0)
}
