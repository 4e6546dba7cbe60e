//! Body construction for target and interceptor launches.

use rand::Rng;

use intercept_core::components::{Body, Interceptor, Target};
use intercept_core::config::{InterceptorLaunch, TargetLaunch};
use intercept_core::constants::GRID_SIZE;
use intercept_core::enums::GuidancePhase;
use intercept_core::profile::ConstantsProfile;
use intercept_core::types::{direction_or, Vec3, UP};

/// Grid corner the target is launched from.
pub fn target_origin() -> Vec3 {
    let half = GRID_SIZE / 2.0;
    Vec3::new(-half, 0.0, -half)
}

/// Build a target at the launch corner, flying along the grid diagonal at
/// `params.angle_deg` above the horizon.
pub fn build_target(params: &TargetLaunch, now: f64) -> Target {
    let half = GRID_SIZE / 2.0;
    let origin = target_origin();
    let heading = direction_or(Vec3::new(half, 0.0, half) - origin, Vec3::X);
    let angle = params.angle_deg.to_radians();
    let mut velocity = heading * (params.speed * angle.cos());
    velocity.y = params.speed * angle.sin();

    Target {
        body: Body {
            position: origin,
            velocity,
            mass: params.mass,
            drag_coefficient: params.drag_coefficient,
            area: params.area,
            active: true,
        },
        launch_time: now,
        launch_position: origin,
        trail: vec![origin],
        last_trail_time: now,
        max_height: 0.0,
        max_distance: 0.0,
    }
}

/// Uniform random ground point on the launch grid.
pub fn random_site(rng: &mut impl Rng) -> Vec3 {
    let half = GRID_SIZE / 2.0;
    Vec3::new(
        rng.gen_range(-half..half),
        0.0,
        rng.gen_range(-half..half),
    )
}

/// Build an interceptor on the ground at `site`, climbing at `params.v0`.
/// Drag coefficient and area come from the profile.
pub fn launch_interceptor(
    id: u32,
    site: Vec3,
    params: &InterceptorLaunch,
    profile: &ConstantsProfile,
    now: f64,
) -> Interceptor {
    let body = Body {
        position: Vec3::new(site.x, 0.0, site.z),
        velocity: UP * params.v0,
        mass: params.mass,
        drag_coefficient: profile.drag_coefficient,
        area: profile.reference_area,
        active: true,
    };
    build_interceptor(
        id,
        body,
        params.thrust,
        params.burn_time,
        params.maneuverability_deg.to_radians(),
        now,
        profile,
    )
}

/// Interceptor in BOOST with guidance constants frozen from `profile`.
/// The aim point starts at the launch position until the first prediction.
pub fn build_interceptor(
    id: u32,
    body: Body,
    thrust: f64,
    burn_time: f64,
    maneuverability: f64,
    now: f64,
    profile: &ConstantsProfile,
) -> Interceptor {
    Interceptor {
        id,
        body,
        thrust,
        burn_remaining: burn_time,
        maneuverability,
        launch_time: now,
        launch_position: body.position,
        phase: GuidancePhase::Boost,
        phase_change_time: now,
        turn_started: false,
        boost_time: profile.boost_time,
        turn_delay: profile.turn_delay,
        navigation_constant: profile.navigation_constant,
        update_interval: profile.update_interval,
        last_los: None,
        los_rate: 0.0,
        aim_point: body.position,
        last_aim_update: now,
        steering_direction: UP,
        predicted_path: Vec::new(),
        last_preview_time: now,
        trail: vec![body.position],
        last_trail_time: now,
        min_distance_to_target: f64::MAX,
        outcome: None,
        diagnostic: None,
    }
}
