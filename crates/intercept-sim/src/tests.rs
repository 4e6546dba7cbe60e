//! Tests for the simulation engine, command handling and engagement flow.

use intercept_core::commands::Command;
use intercept_core::components::{Body, Target};
use intercept_core::enums::*;
use intercept_core::events::SimEvent;
use intercept_core::profile::ConstantsProfile;
use intercept_core::state::SimSnapshot;
use intercept_core::types::{horizontal_distance, Vec3};

use crate::engine::{SimConfig, SimulationEngine};
use crate::launch::{build_interceptor, build_target, target_origin};

/// Engine with no atmosphere and a fixed hit probability.
fn engine_with_probability(probability: f64) -> SimulationEngine {
    SimulationEngine::new(SimConfig {
        atmosphere_model: AtmosphereModel::None,
        constants: ConstantsProfile {
            intercept_probability: probability,
            ..ConstantsProfile::trajectory()
        },
        ..Default::default()
    })
}

/// Stationary target 15 m above an unpowered interceptor climbing at 500 m/s.
fn place_close_pair(engine: &mut SimulationEngine, interceptors: usize) {
    let mut target = build_target(&Default::default(), 0.0);
    target.body.position = Vec3::new(0.0, 1015.0, 0.0);
    target.body.velocity = Vec3::ZERO;
    engine.insert_target(target);

    let profile = *engine.profile();
    for _ in 0..interceptors {
        let body = Body {
            position: Vec3::new(0.0, 1000.0, 0.0),
            velocity: Vec3::new(0.0, 500.0, 0.0),
            mass: 500.0,
            drag_coefficient: 0.5,
            area: 0.1,
            active: true,
        };
        engine.insert_interceptor(build_interceptor(
            0,
            body,
            0.0,
            0.0,
            30f64.to_radians(),
            0.0,
            &profile,
        ));
    }
}

fn count_events(snapshot: &SimSnapshot, pred: impl Fn(&SimEvent) -> bool) -> usize {
    snapshot.events.iter().filter(|e| pred(e)).count()
}

fn has_warning(snapshot: &SimSnapshot) -> bool {
    snapshot
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::Warning { .. }))
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone());
    let mut engine_b = SimulationEngine::new(config);

    engine_a.queue_command(Command::LaunchTarget);
    engine_b.queue_command(Command::LaunchTarget);

    for tick in 0..400 {
        if tick % 50 == 10 {
            engine_a.queue_command(Command::LaunchInterceptor { site: None });
            engine_b.queue_command(Command::LaunchInterceptor { site: None });
        }
        let snap_a = engine_a.tick(0.05);
        let snap_b = engine_b.tick(0.05);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_random_sites_depend_on_seed() {
    let launch = |seed: u64| {
        let mut engine = SimulationEngine::new(SimConfig {
            seed,
            ..Default::default()
        });
        engine.queue_commands([Command::LaunchTarget, Command::LaunchInterceptor { site: None }]);
        engine.tick(0.01);
        engine.interceptors()[0].launch_position
    };
    assert_eq!(launch(7), launch(7));
    assert_ne!(launch(7), launch(8));
}

// ---- Tick timing ----

#[test]
fn test_frame_dt_is_clamped() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.tick(5.0);
    assert!((engine.time().elapsed_secs - 0.1).abs() < 1e-12);

    engine.tick(-1.0);
    engine.tick(f64::NAN);
    engine.tick(0.0);
    assert!((engine.time().elapsed_secs - 0.1).abs() < 1e-12);
    assert_eq!(engine.time().tick, 1);
}

#[test]
fn test_zero_frame_dt_keeps_bodies_on_the_pad() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        Command::LaunchTarget,
        Command::LaunchInterceptor {
            site: Some(Vec3::new(500.0, 0.0, 500.0)),
        },
    ]);
    let snap = engine.tick(0.0);

    assert!(snap.target.is_some(), "target must survive a zero-length frame");
    assert_eq!(
        count_events(&snap, |e| matches!(e, SimEvent::TargetImpact { .. })),
        0
    );
    assert_eq!(
        count_events(&snap, |e| matches!(e, SimEvent::EngagementEnded { .. })),
        0
    );
    assert!(!engine.engagement_over());
    let interceptor = &engine.interceptors()[0];
    assert!(interceptor.body.active);
    assert!(interceptor.outcome.is_none());

    // The next real frame lifts both off the ground.
    let snap = engine.tick(0.02);
    let target = snap.target.as_ref().expect("target in flight");
    assert!(target.position.y > 0.0);
    assert!(engine.interceptors()[0].body.position.y > 0.0);
}

// ---- Target flight ----

#[test]
fn test_vacuum_apex_and_range() {
    let mut engine = SimulationEngine::new(SimConfig {
        atmosphere_model: AtmosphereModel::None,
        ..Default::default()
    });
    engine.queue_command(Command::LaunchTarget);

    let mut max_height: f64 = 0.0;
    let mut impact = None;
    for _ in 0..10_000 {
        let snap = engine.tick(0.02);
        if let Some(target) = &snap.target {
            max_height = max_height.max(target.max_height);
        }
        impact = snap.events.iter().find_map(|e| match e {
            SimEvent::TargetImpact { position } => Some(*position),
            _ => None,
        });
        if impact.is_some() {
            break;
        }
    }

    // 1000 m/s at 45 degrees, g = 9.81.
    let vy: f64 = 1000.0 * 45f64.to_radians().sin();
    let expected_apex = vy * vy / (2.0 * 9.81);
    assert!(
        (max_height - expected_apex).abs() / expected_apex < 0.02,
        "apex {max_height} vs {expected_apex}"
    );

    let impact = impact.expect("target should land");
    let range = horizontal_distance(target_origin(), impact);
    let expected_range = 1000.0 * 1000.0 / 9.81;
    assert!(
        (range - expected_range).abs() / expected_range < 0.02,
        "range {range} vs {expected_range}"
    );
    assert!(engine.target().is_none());
}

#[test]
fn test_drag_lowers_apex() {
    let apex = |model: AtmosphereModel| {
        let mut engine = SimulationEngine::new(SimConfig {
            atmosphere_model: model,
            ..Default::default()
        });
        engine.queue_command(Command::LaunchTarget);
        for _ in 0..400 {
            engine.tick(0.1);
        }
        engine.target().map(|t| t.max_height).unwrap_or(0.0)
    };
    assert!(apex(AtmosphereModel::Exponential) < apex(AtmosphereModel::None));
}

#[test]
fn test_target_impact_ends_engagement_once() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(Command::LaunchTarget);

    let mut impacts = 0;
    let mut ended = Vec::new();
    for _ in 0..3000 {
        let snap = engine.tick(0.1);
        impacts += count_events(&snap, |e| matches!(e, SimEvent::TargetImpact { .. }));
        for event in &snap.events {
            if let SimEvent::EngagementEnded { result, .. } = event {
                ended.push(*result);
            }
        }
    }
    assert_eq!(impacts, 1);
    assert_eq!(ended, vec![EngagementResult::TargetImpacted]);

    engine.queue_command(Command::LaunchInterceptor { site: None });
    let snap = engine.tick(0.1);
    assert!(has_warning(&snap), "launch without a target should warn");
    assert!(engine.interceptors().is_empty());
}

// ---- Pause/Resume/Reset ----

#[test]
fn test_pause_stops_simulation() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(Command::LaunchTarget);
    engine.tick(0.05);

    engine.queue_command(Command::Pause);
    let paused = engine.tick(0.05);
    assert!(paused.paused);
    let frozen_time = engine.time();
    let frozen_position = engine.target().map(|t| t.body.position);

    for _ in 0..10 {
        engine.tick(0.05);
    }
    assert_eq!(engine.time(), frozen_time);
    assert_eq!(engine.target().map(|t| t.body.position), frozen_position);

    engine.queue_command(Command::Resume);
    let resumed = engine.tick(0.05);
    assert!(!resumed.paused);
    assert!(engine.time().elapsed_secs > frozen_time.elapsed_secs);
}

#[test]
fn test_reset_clears_scene() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        Command::LaunchTarget,
        Command::LaunchInterceptor {
            site: Some(Vec3::new(100.0, 0.0, 100.0)),
        },
    ]);
    for _ in 0..20 {
        engine.tick(0.05);
    }
    assert!(engine.target().is_some());
    assert_eq!(engine.interceptors().len(), 1);

    engine.queue_command(Command::Reset);
    engine.queue_command(Command::Pause);
    let snap = engine.tick(0.05);
    assert!(snap.target.is_none());
    assert!(snap.interceptors.is_empty());
    assert!(snap.debris.is_empty());
    assert_eq!(engine.time().elapsed_secs, 0.0);
    assert!(engine.atmosphere().cache().is_empty());
}

#[test]
fn test_relaunch_replaces_target() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(Command::LaunchTarget);
    for _ in 0..50 {
        engine.tick(0.1);
    }
    engine.queue_command(Command::LaunchTarget);
    let snap = engine.tick(0.01);
    let target = snap.target.as_ref().expect("relaunched target");
    assert_eq!(target.trail.len(), 1);
    assert!(target.position.y < 20.0);
    assert_eq!(
        count_events(&snap, |e| matches!(e, SimEvent::TargetLaunched { .. })),
        1
    );
}

// ---- Launch gating ----

#[test]
fn test_launch_interceptor_requires_target() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(Command::LaunchInterceptor { site: None });
    let snap = engine.tick(0.05);
    assert!(has_warning(&snap));
    assert!(snap.interceptors.is_empty());
}

#[test]
fn test_interceptor_cap_limits_launches_per_target() {
    let mut engine = SimulationEngine::new(SimConfig {
        max_interceptors: 2,
        ..Default::default()
    });
    engine.queue_command(Command::LaunchTarget);
    for _ in 0..3 {
        engine.queue_command(Command::LaunchInterceptor { site: None });
    }
    let snap = engine.tick(0.01);
    assert_eq!(snap.interceptors.len(), 2);
    assert_eq!(snap.active_interceptors, 2);
    assert_eq!(snap.max_interceptors, 2);
    assert_eq!(count_events(&snap, |e| matches!(e, SimEvent::Warning { .. })), 1);
}

#[test]
fn test_missed_interceptors_still_count_against_cap() {
    let mut engine = SimulationEngine::new(SimConfig {
        max_interceptors: 2,
        atmosphere_model: AtmosphereModel::None,
        constants: ConstantsProfile {
            intercept_probability: 0.0,
            ..ConstantsProfile::trajectory()
        },
        ..Default::default()
    });
    place_close_pair(&mut engine, 1);
    engine.tick(0.01);
    assert_eq!(engine.interceptors()[0].outcome, Some(Outcome::Miss));
    assert!(!engine.engagement_over());

    engine.queue_command(Command::LaunchInterceptor { site: None });
    engine.queue_command(Command::LaunchInterceptor { site: None });
    let snap = engine.tick(0.01);
    assert_eq!(engine.interceptors().len(), 2);
    assert_eq!(count_events(&snap, |e| matches!(e, SimEvent::Warning { .. })), 1);
    assert_eq!(
        count_events(&snap, |e| matches!(e, SimEvent::InterceptorLaunched { .. })),
        1
    );
}

#[test]
fn test_relaunching_target_resets_the_cap() {
    let mut engine = SimulationEngine::new(SimConfig {
        max_interceptors: 1,
        ..Default::default()
    });
    engine.queue_commands([Command::LaunchTarget, Command::LaunchInterceptor { site: None }]);
    engine.tick(0.01);
    assert_eq!(engine.interceptors().len(), 1);

    engine.queue_commands([Command::LaunchTarget, Command::LaunchInterceptor { site: None }]);
    let snap = engine.tick(0.01);
    assert!(!has_warning(&snap));
    assert_eq!(engine.interceptors().len(), 1);
    assert_eq!(engine.interceptors()[0].id, 1);
}

#[test]
fn test_launch_site_is_forced_to_ground() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        Command::LaunchTarget,
        Command::LaunchInterceptor {
            site: Some(Vec3::new(250.0, 80.0, -400.0)),
        },
    ]);
    engine.tick(0.01);
    let interceptor = &engine.interceptors()[0];
    assert_eq!(interceptor.launch_position, Vec3::new(250.0, 0.0, -400.0));
    assert_eq!(interceptor.phase, GuidancePhase::Boost);
    assert!(!interceptor.predicted_path.is_empty());
}

#[test]
fn test_non_finite_site_rejected() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        Command::LaunchTarget,
        Command::LaunchInterceptor {
            site: Some(Vec3::new(f64::NAN, 0.0, 0.0)),
        },
    ]);
    let snap = engine.tick(0.01);
    assert!(has_warning(&snap));
    assert!(engine.interceptors().is_empty());
}

#[test]
fn test_set_max_interceptors_sanitized() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(Command::SetMaxInterceptors { count: 50 });
    let snap = engine.tick(0.01);
    assert!(has_warning(&snap));
    assert_eq!(engine.config().max_interceptors, 10);

    engine.queue_command(Command::SetMaxInterceptors { count: 0 });
    engine.tick(0.01);
    assert_eq!(engine.config().max_interceptors, 1);

    engine.queue_command(Command::SetMaxInterceptors { count: 3 });
    let snap = engine.tick(0.01);
    assert!(!has_warning(&snap));
    assert_eq!(snap.max_interceptors, 3);
}

// ---- Classification pipeline ----

#[test]
fn test_certain_hit_destroys_target() {
    let mut engine = engine_with_probability(1.0);
    place_close_pair(&mut engine, 1);

    let snap = engine.tick(0.01);
    assert!(snap.target.is_none());
    assert!(engine.target().is_none());

    let interceptor = &engine.interceptors()[0];
    assert!(!interceptor.body.active);
    assert_eq!(interceptor.outcome, Some(Outcome::Hit));
    assert!(interceptor.diagnostic.is_none());
    assert!(snap.debris.is_empty(), "hits leave no debris marker");

    assert!(snap.events.iter().any(|e| matches!(
        e,
        SimEvent::Classified {
            outcome: Outcome::Hit,
            ..
        }
    )));
    assert!(snap.events.iter().any(|e| matches!(
        e,
        SimEvent::EngagementEnded {
            result: EngagementResult::TargetDestroyed,
            ..
        }
    )));
}

#[test]
fn test_zero_probability_always_misses() {
    for seed in 0..20 {
        let mut engine = SimulationEngine::new(SimConfig {
            seed,
            atmosphere_model: AtmosphereModel::None,
            constants: ConstantsProfile {
                intercept_probability: 0.0,
                ..ConstantsProfile::trajectory()
            },
            ..Default::default()
        });
        place_close_pair(&mut engine, 1);
        let snap = engine.tick(0.01);

        let interceptor = &engine.interceptors()[0];
        assert_eq!(interceptor.outcome, Some(Outcome::Miss));
        assert!(!interceptor.body.active);
        assert!(snap.target.is_some(), "target survives a miss");
        assert!(snap.debris.is_empty());
    }
}

#[test]
fn test_hit_short_circuits_later_interceptors() {
    let mut engine = engine_with_probability(1.0);
    place_close_pair(&mut engine, 2);

    let snap = engine.tick(0.01);
    let first = &engine.interceptors()[0];
    let second = &engine.interceptors()[1];
    assert_eq!(first.outcome, Some(Outcome::Hit));
    assert!(second.body.active);
    assert!(second.outcome.is_none());
    assert_eq!(second.body.position, Vec3::new(0.0, 1000.0, 0.0));
    assert_eq!(
        count_events(&snap, |e| matches!(e, SimEvent::Classified { .. })),
        1
    );
}

#[test]
fn test_exhaustion_ends_engagement() {
    let mut engine = SimulationEngine::new(SimConfig {
        max_interceptors: 1,
        atmosphere_model: AtmosphereModel::None,
        constants: ConstantsProfile {
            intercept_probability: 0.0,
            ..ConstantsProfile::trajectory()
        },
        ..Default::default()
    });
    place_close_pair(&mut engine, 1);

    let snap = engine.tick(0.01);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        SimEvent::EngagementEnded {
            result: EngagementResult::InterceptorsExhausted,
            ..
        }
    )));
    assert!(engine.engagement_over());

    engine.queue_command(Command::LaunchInterceptor { site: None });
    let snap = engine.tick(0.01);
    assert!(has_warning(&snap));
    assert_eq!(engine.interceptors().len(), 1);
    assert_eq!(
        count_events(&snap, |e| matches!(e, SimEvent::EngagementEnded { .. })),
        0
    );
}

#[test]
fn test_ground_impact_leaves_debris() {
    let mut engine = engine_with_probability(1.0);
    engine.queue_command(Command::LaunchTarget);
    engine.tick(0.01);

    let profile = *engine.profile();
    let body = Body {
        position: Vec3::new(3000.0, 1.0, 3000.0),
        velocity: Vec3::new(0.0, -300.0, 0.0),
        mass: 500.0,
        drag_coefficient: 0.5,
        area: 0.1,
        active: true,
    };
    engine.insert_interceptor(build_interceptor(0, body, 0.0, 0.0, 0.5, 0.01, &profile));

    let snap = engine.tick(0.01);
    let interceptor = &engine.interceptors()[0];
    assert_eq!(interceptor.outcome, Some(Outcome::Ground));
    assert_eq!(snap.debris.len(), 1);
    assert_eq!(snap.debris[0].kind, Outcome::Ground);
    assert_eq!(snap.debris[0].position.y, 0.0);
    assert!(interceptor.predicted_path.is_empty());
}

#[test]
fn test_non_finite_state_classified_as_miss() {
    let mut engine = engine_with_probability(1.0);
    engine.queue_command(Command::LaunchTarget);
    engine.tick(0.01);

    let profile = *engine.profile();
    let body = Body {
        position: Vec3::new(1000.0, 500.0, 1000.0),
        velocity: Vec3::new(f64::NAN, 0.0, 0.0),
        mass: 500.0,
        drag_coefficient: 0.5,
        area: 0.1,
        active: true,
    };
    engine.insert_interceptor(build_interceptor(0, body, 0.0, 0.0, 0.5, 0.01, &profile));

    let snap = engine.tick(0.01);
    let interceptor = &engine.interceptors()[0];
    assert_eq!(interceptor.outcome, Some(Outcome::Miss));
    let diag = interceptor.diagnostic.expect("fault diagnostic");
    assert_eq!(diag.reason, MissReason::NumericalFault);
    assert!(snap.debris.is_empty());
    assert!(snap.target.is_some());
}

// ---- Guidance over a full flight ----

#[test]
fn test_phase_and_min_distance_are_monotone() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(Command::LaunchTarget);
    for _ in 0..100 {
        engine.tick(0.05);
    }
    engine.queue_command(Command::LaunchInterceptor {
        site: Some(Vec3::new(1500.0, 0.0, 1500.0)),
    });

    let mut last_phase = GuidancePhase::Boost;
    let mut last_min = f64::MAX;
    let mut phases_seen = Vec::new();
    for _ in 0..5000 {
        let snap = engine.tick(0.05);
        for event in &snap.events {
            if let SimEvent::PhaseChanged { from, to, .. } = event {
                assert!(to > from);
                phases_seen.push(*to);
            }
        }
        let Some(interceptor) = engine.interceptors().first() else {
            break;
        };
        assert!(interceptor.phase >= last_phase, "phase regressed");
        last_phase = interceptor.phase;
        assert!(interceptor.min_distance_to_target <= last_min);
        last_min = interceptor.min_distance_to_target;
        if !interceptor.body.active {
            break;
        }
    }

    assert!(phases_seen.contains(&GuidancePhase::Midcourse));
    let interceptor = &engine.interceptors()[0];
    assert!(
        interceptor.outcome.is_some() || engine.target().is_none(),
        "flight should resolve"
    );
}

#[test]
fn test_snapshot_reports_hit_probability() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        Command::LaunchTarget,
        Command::LaunchInterceptor {
            site: Some(Vec3::new(0.0, 0.0, 0.0)),
        },
    ]);
    let snap = engine.tick(0.02);
    let p = snap.hit_probability.expect("active interceptor");
    assert!((0.0..=1.0).contains(&p));
    assert_eq!(snap.interceptors[0].phase, "BOOST");

    let mut idle = SimulationEngine::new(SimConfig::default());
    idle.queue_command(Command::LaunchTarget);
    assert!(idle.tick(0.02).hit_probability.is_none());
}

// ---- Constants and selectors ----

#[test]
fn test_apply_lead_preset() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(Command::ApplyConstantsPreset {
        name: "lead".to_string(),
    });
    let snap = engine.tick(0.01);
    assert_eq!(*engine.profile(), ConstantsProfile::lead());
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::PresetApplied { name } if name == "lead")));
}

#[test]
fn test_unknown_preset_rejected() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(Command::ApplyConstantsPreset {
        name: "aggressive".to_string(),
    });
    let snap = engine.tick(0.01);
    assert!(has_warning(&snap));
    assert_eq!(*engine.profile(), ConstantsProfile::trajectory());
}

#[test]
fn test_entries_replayed_as_constants_match_preset() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let commands = ConstantsProfile::lead()
        .entries()
        .into_iter()
        .map(|(name, value)| Command::SetConstant {
            name: name.to_string(),
            value,
        });
    engine.queue_commands(commands);
    let snap = engine.tick(0.01);
    assert!(!has_warning(&snap));
    assert_eq!(*engine.profile(), ConstantsProfile::lead());
}

#[test]
fn test_set_constant_validation() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(Command::SetConstant {
        name: "interceptProbability".to_string(),
        value: 5.0,
    });
    let snap = engine.tick(0.01);
    assert!(has_warning(&snap));
    assert_eq!(engine.profile().intercept_probability, 0.85);

    engine.queue_command(Command::SetConstant {
        name: "warpFactor".to_string(),
        value: 1.0,
    });
    let snap = engine.tick(0.01);
    assert!(has_warning(&snap));

    engine.queue_command(Command::SetConstant {
        name: "navigationConstant".to_string(),
        value: 4.0,
    });
    let snap = engine.tick(0.01);
    assert!(!has_warning(&snap));
    assert_eq!(engine.profile().navigation_constant, 4.0);
}

#[test]
fn test_scale_height_change_clears_density_cache() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(Command::LaunchTarget);
    for _ in 0..50 {
        engine.tick(0.1);
    }
    assert!(!engine.atmosphere().cache().is_empty());

    engine.queue_commands([
        Command::Pause,
        Command::SetConstant {
            name: "H".to_string(),
            value: 8000.0,
        },
    ]);
    engine.tick(0.1);
    assert!(engine.atmosphere().cache().is_empty());
    assert_eq!(engine.profile().scale_height, 8000.0);
}

#[test]
fn test_set_intercept_type_applies_preset() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(Command::SetInterceptType {
        intercept_type: InterceptType::Lead,
    });
    let snap = engine.tick(0.01);
    assert_eq!(snap.intercept_type, InterceptType::Lead);
    assert_eq!(*engine.profile(), ConstantsProfile::lead());

    // Out-of-range edits now fall back to the lead defaults.
    engine.queue_command(Command::SetConstant {
        name: "interceptProbability".to_string(),
        value: -1.0,
    });
    engine.tick(0.01);
    assert_eq!(engine.profile().intercept_probability, 1.0);
}

#[test]
fn test_set_atmosphere_model() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        Command::LaunchTarget,
        Command::SetAtmosphereModel {
            model: AtmosphereModel::None,
        },
    ]);
    let snap = engine.tick(0.1);
    assert_eq!(snap.atmosphere_model, AtmosphereModel::None);
    assert_eq!(engine.atmosphere().model(), AtmosphereModel::None);
    assert!(engine.atmosphere().cache().is_empty());
}

#[test]
fn test_lead_engagement_runs_to_completion() {
    let mut engine = SimulationEngine::new(SimConfig {
        intercept_type: InterceptType::Lead,
        constants: ConstantsProfile::lead(),
        ..Default::default()
    });
    engine.queue_command(Command::LaunchTarget);
    for _ in 0..60 {
        engine.tick(0.05);
    }
    engine.queue_command(Command::LaunchInterceptor {
        site: Some(Vec3::new(2000.0, 0.0, 2000.0)),
    });

    let mut ended = false;
    for _ in 0..5000 {
        let snap = engine.tick(0.05);
        for interceptor in &snap.interceptors {
            assert!(interceptor.position.is_finite());
            assert!(interceptor.aim_point.is_finite());
        }
        if count_events(&snap, |e| matches!(e, SimEvent::EngagementEnded { .. })) > 0 {
            ended = true;
            break;
        }
    }
    assert!(ended, "engagement should end by hit, impact or exhaustion");
}

#[test]
fn test_insert_target_helper_keeps_engine_consistent() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let target: Target = build_target(&Default::default(), 0.0);
    engine.insert_target(target);
    assert!(engine.target().is_some());
    assert!(!engine.engagement_over());
}
