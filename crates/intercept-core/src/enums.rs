//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Interceptor guidance regime. Ordered: phases only ever move forward.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuidancePhase {
    /// Vertical climb out of the launcher.
    #[default]
    Boost,
    /// Steering toward the predicted intercept point.
    Midcourse,
    /// Close-in homing with proportional navigation.
    Terminal,
}

impl GuidancePhase {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Boost => "BOOST",
            Self::Midcourse => "MIDCOURSE",
            Self::Terminal => "TERMINAL",
        }
    }
}

/// Terminal classification of an interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Target destroyed.
    Hit,
    /// Proximity roll failed, or the interceptor passed at a bad angle.
    Miss,
    /// Interceptor hit the ground.
    Ground,
    /// Interceptor's separation started growing without reaching kill radius.
    Trajectory,
}

/// Air density model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtmosphereModel {
    /// Vacuum.
    None,
    /// Barometric falloff with a temperature correction.
    #[default]
    Exponential,
}

impl AtmosphereModel {
    /// Parse a selector name (`"none"` / `"exponential"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Self::None),
            "exponential" => Some(Self::Exponential),
            _ => None,
        }
    }
}

/// Intercept-point prediction algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterceptType {
    /// Iterative drag-aware propagation of the target.
    #[default]
    Trajectory,
    /// Closed-form constant-velocity collision course.
    Lead,
}

impl InterceptType {
    /// Parse a selector name (`"trajectory"` / `"lead"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "trajectory" => Some(Self::Trajectory),
            "lead" => Some(Self::Lead),
            _ => None,
        }
    }

    /// Name of the constants preset tuned for this algorithm.
    pub fn preset_name(self) -> &'static str {
        match self {
            Self::Trajectory => "trajectory",
            Self::Lead => "lead",
        }
    }
}

/// Why a miss-class outcome fired, as recorded in its diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissReason {
    /// Velocity pointed too far off the bearing to the target.
    LargeBearingAngle,
    /// Too far from the target when classified.
    ExcessiveDistance,
    /// Slower than the target.
    InsufficientSpeed,
    /// Closest approach never came near the kill radius.
    InsufficientClosure,
    /// Close approach, adequate speed, still diverged.
    SuboptimalTrajectory,
    /// Non-finite state or prediction.
    NumericalFault,
    /// None of the above applies.
    Unspecified,
}

/// How an engagement ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementResult {
    /// An interceptor hit the target.
    TargetDestroyed,
    /// The target reached the ground.
    TargetImpacted,
    /// Every allowed interceptor was spent without a hit.
    InterceptorsExhausted,
}
