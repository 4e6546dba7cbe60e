//! Commands sent from a driver to the simulation.
//!
//! Commands are queued and applied at the start of the next tick, before
//! any physics runs.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Vec3;

/// All possible control actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    // --- Engagement ---
    /// Clear the scene and launch a fresh target.
    LaunchTarget,
    /// Launch an interceptor from `site` (ground point), or a random grid point.
    LaunchInterceptor {
        #[serde(default)]
        site: Option<Vec3>,
    },

    // --- Simulation control ---
    /// Remove every body and zero the clock.
    Reset,
    Pause,
    Resume,

    // --- Tuning ---
    /// Replace the whole constants profile with a named preset.
    ApplyConstantsPreset { name: String },
    /// Change the interceptor cap.
    SetMaxInterceptors { count: u32 },
    /// Change one guidance constant (range-checked).
    SetConstant { name: String, value: f64 },
    /// Switch prediction algorithm; also applies the matching preset.
    SetInterceptType { intercept_type: InterceptType },
    SetAtmosphereModel { model: AtmosphereModel },
}
