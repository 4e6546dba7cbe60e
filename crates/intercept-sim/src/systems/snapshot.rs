//! Snapshot system: builds the complete SimSnapshot from engine state.
//!
//! This system is read-only.

use intercept_core::components::{DebrisMarker, Interceptor, Target};
use intercept_core::config::SimConfig;
use intercept_core::events::SimEvent;
use intercept_core::profile::ConstantsProfile;
use intercept_core::state::*;
use intercept_core::types::{orientation, SimTime};

use crate::classifier;

/// Build a complete SimSnapshot from the current state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    time: &SimTime,
    paused: bool,
    config: &SimConfig,
    profile: &ConstantsProfile,
    target: Option<&Target>,
    interceptors: &[Interceptor],
    debris: &[DebrisMarker],
    events: Vec<SimEvent>,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        paused,
        intercept_type: config.intercept_type,
        atmosphere_model: config.atmosphere_model,
        target: target.map(|t| build_target(t, time.elapsed_secs)),
        interceptors: interceptors.iter().map(build_interceptor).collect(),
        debris: debris.to_vec(),
        events,
        hit_probability: target
            .and_then(|t| closest_hit_probability(t, interceptors, config.kill_radius, profile)),
        active_interceptors: interceptors.iter().filter(|i| i.body.active).count() as u32,
        max_interceptors: config.max_interceptors,
    }
}

fn build_target(target: &Target, now: f64) -> TargetView {
    TargetView {
        position: target.body.position,
        velocity: target.body.velocity,
        orientation: orientation(target.body.velocity),
        trail: target.trail.clone(),
        max_height: target.max_height,
        max_distance: target.max_distance,
        flight_time: now - target.launch_time,
    }
}

fn build_interceptor(interceptor: &Interceptor) -> InterceptorView {
    InterceptorView {
        id: interceptor.id,
        active: interceptor.body.active,
        position: interceptor.body.position,
        velocity: interceptor.body.velocity,
        orientation: orientation(interceptor.body.velocity),
        phase: interceptor.phase.label().to_string(),
        aim_point: interceptor.aim_point,
        predicted_path: interceptor.predicted_path.clone(),
        trail: interceptor.trail.clone(),
        burn_remaining: interceptor.burn_remaining,
        min_distance: interceptor.min_distance_to_target,
        outcome: interceptor.outcome,
        diagnostic: interceptor.diagnostic,
    }
}

/// Advisory probability for the active interceptor nearest the target.
fn closest_hit_probability(
    target: &Target,
    interceptors: &[Interceptor],
    kill_radius: f64,
    profile: &ConstantsProfile,
) -> Option<f64> {
    interceptors
        .iter()
        .filter(|i| i.body.active)
        .min_by(|a, b| {
            let da = a.body.position.distance_squared(target.body.position);
            let db = b.body.position.distance_squared(target.body.position);
            da.total_cmp(&db)
        })
        .map(|i| classifier::estimate_hit_probability(&i.body, &target.body, kill_radius, profile))
}
