//! State-change events emitted by the simulation for presentation layers.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Vec3;

/// Discrete events, drained into each tick's snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    TargetLaunched {
        position: Vec3,
        velocity: Vec3,
    },
    InterceptorLaunched {
        interceptor_id: u32,
        position: Vec3,
    },
    PhaseChanged {
        interceptor_id: u32,
        from: GuidancePhase,
        to: GuidancePhase,
        time_secs: f64,
    },
    /// An interceptor received its terminal outcome.
    Classified {
        interceptor_id: u32,
        outcome: Outcome,
        position: Vec3,
        diagnostic: Option<MissDiagnostic>,
    },
    /// The target reached the ground.
    TargetImpact { position: Vec3 },
    /// Emitted once per engagement.
    EngagementEnded {
        result: EngagementResult,
        time_secs: f64,
    },
    PresetApplied { name: String },
    /// A command was rejected or a value replaced; the simulation continues.
    Warning { message: String },
}

/// Guidance tuning in effect when a miss was classified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuidanceSettings {
    pub midcourse_aggressiveness: f64,
    pub terminal_aggressiveness: f64,
    pub turn_smoothing_factor: f64,
    pub min_turn_rate: f64,
    pub max_turn_rate: f64,
    pub navigation_constant: f64,
    pub trajectory_lead_factor: f64,
}

/// Why a miss-class outcome fired, with the numbers that led to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissDiagnostic {
    pub outcome: Outcome,
    pub reason: MissReason,
    /// Separation at classification (m).
    pub distance: f64,
    /// Closest approach seen (m).
    pub min_distance: f64,
    /// Angle between velocity and bearing to target (degrees).
    pub bearing_angle_deg: f64,
    pub miss_angle_threshold_deg: f64,
    pub kill_radius: f64,
    /// Upper edge of the angular-miss band (m).
    pub miss_distance: f64,
    pub interceptor_speed: f64,
    pub target_speed: f64,
    pub phase: GuidancePhase,
    pub guidance: GuidanceSettings,
}
