//! Per-tick snapshot: the complete visible state handed to a presentation layer.

use serde::{Deserialize, Serialize};

use crate::components::DebrisMarker;
use crate::enums::*;
use crate::events::{MissDiagnostic, SimEvent};
use crate::types::{SimTime, Vec3};

/// Complete simulation state after one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub paused: bool,
    pub intercept_type: InterceptType,
    pub atmosphere_model: AtmosphereModel,
    pub target: Option<TargetView>,
    pub interceptors: Vec<InterceptorView>,
    pub debris: Vec<DebrisMarker>,
    /// Events produced since the previous snapshot.
    pub events: Vec<SimEvent>,
    /// Advisory hit probability of the closest active interceptor.
    pub hit_probability: Option<f64>,
    pub active_interceptors: u32,
    pub max_interceptors: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetView {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Unit heading for display.
    pub orientation: Vec3,
    pub trail: Vec<Vec3>,
    pub max_height: f64,
    pub max_distance: f64,
    pub flight_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterceptorView {
    pub id: u32,
    pub active: bool,
    pub position: Vec3,
    pub velocity: Vec3,
    pub orientation: Vec3,
    /// "BOOST", "MIDCOURSE" or "TERMINAL".
    pub phase: String,
    pub aim_point: Vec3,
    pub predicted_path: Vec<Vec3>,
    pub trail: Vec<Vec3>,
    pub burn_remaining: f64,
    pub min_distance: f64,
    pub outcome: Option<Outcome>,
    pub diagnostic: Option<MissDiagnostic>,
}
