//! Simulated bodies.
//!
//! Components are plain data structs with no methods.
//! Flight logic lives in the simulation crate's systems.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::MissDiagnostic;
use crate::types::Vec3;

/// State shared by every simulated body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    /// kg.
    pub mass: f64,
    pub drag_coefficient: f64,
    /// Cross-section area (m²).
    pub area: f64,
    /// Cleared exactly once, when the body is classified or impacts.
    pub active: bool,
}

/// The ballistic target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub body: Body,
    pub launch_time: f64,
    pub launch_position: Vec3,
    /// Position history, one point per trail interval.
    pub trail: Vec<Vec3>,
    pub last_trail_time: f64,
    /// Highest altitude reached (m).
    pub max_height: f64,
    /// Greatest horizontal distance from the launch point (m).
    pub max_distance: f64,
}

/// A guided interceptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interceptor {
    /// Sequential launch id, starting at 1.
    pub id: u32,
    pub body: Body,
    /// Motor thrust (N).
    pub thrust: f64,
    /// Seconds of burn left.
    pub burn_remaining: f64,
    /// Maximum turn rate (rad/s).
    pub maneuverability: f64,
    pub launch_time: f64,
    pub launch_position: Vec3,

    // --- Guidance state ---
    pub phase: GuidancePhase,
    /// Sim time of the latest phase change.
    pub phase_change_time: f64,
    pub turn_started: bool,
    /// Guidance constants frozen at launch.
    pub boost_time: f64,
    pub turn_delay: f64,
    pub navigation_constant: f64,
    pub update_interval: f64,
    /// Line of sight seen on the previous tick.
    pub last_los: Option<Vec3>,
    /// Angular rate of the line of sight (rad/s).
    pub los_rate: f64,
    pub aim_point: Vec3,
    /// Sim time the aim point was last refreshed.
    pub last_aim_update: f64,
    /// Last commanded flight direction.
    pub steering_direction: Vec3,

    // --- Preview and history ---
    pub predicted_path: Vec<Vec3>,
    pub last_preview_time: f64,
    pub trail: Vec<Vec3>,
    pub last_trail_time: f64,

    // --- Outcome ---
    /// Running minimum separation from the target (m).
    pub min_distance_to_target: f64,
    pub outcome: Option<Outcome>,
    pub diagnostic: Option<MissDiagnostic>,
}

/// Wreckage left where an interceptor was classified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebrisMarker {
    pub interceptor_id: u32,
    pub position: Vec3,
    pub kind: Outcome,
}
