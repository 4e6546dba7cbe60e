//! Guidance and physics tuning constants.
//!
//! A [`ConstantsProfile`] is replaced as a whole value (preset application)
//! or edited one range-checked entry at a time between ticks. During a tick
//! it is read-only.

use serde::{Deserialize, Serialize};

use crate::config::ParamRange;
use crate::enums::InterceptType;
use crate::error::ConfigError;

/// Every tunable scalar that shapes guidance and flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantsProfile {
    // --- Phase timing ---
    /// Vertical climb duration (s).
    pub boost_time: f64,
    /// Earliest flight time for the midcourse turn (s).
    pub turn_delay: f64,
    pub turn_factor: f64,
    /// Proportional navigation gain.
    pub navigation_constant: f64,
    /// Range at which terminal homing begins (m).
    pub terminal_distance: f64,
    /// Aim point refresh period (s).
    pub update_interval: f64,
    pub close_range: f64,

    // --- Steering ---
    pub thrust_direction_factor: f64,
    pub velocity_adjustment_rate: f64,
    pub midcourse_aggressiveness: f64,
    /// Path preview refresh period (s).
    pub prediction_update_interval: f64,
    pub trajectory_lead_factor: f64,
    pub terminal_aggressiveness: f64,
    pub intercept_probability: f64,

    // --- Physics ---
    #[serde(rename = "g")]
    pub gravity: f64,
    #[serde(rename = "rho0")]
    pub sea_level_density: f64,
    #[serde(rename = "H")]
    pub scale_height: f64,
    /// Interceptor drag coefficient.
    #[serde(rename = "Cd")]
    pub drag_coefficient: f64,
    /// Interceptor reference area (m²).
    #[serde(rename = "A")]
    pub reference_area: f64,

    // --- Classification ---
    pub miss_distance_multiplier: f64,
    /// Degrees.
    pub miss_angle_threshold: f64,
    pub miss_max_distance: f64,
    /// Degrees.
    pub hit_angle_threshold: f64,
    pub speed_threshold_factor: f64,

    // --- Turn limiting ---
    pub turn_smoothing_factor: f64,
    /// Radians per tick.
    pub min_turn_rate: f64,
    /// Radians per tick.
    pub max_turn_rate: f64,

    // --- Hit probability weights ---
    pub distance_weight: f64,
    pub angle_weight: f64,
    pub speed_weight: f64,
    pub max_closing_speed: f64,
    pub min_closing_speed: f64,
}

/// Accepted range of every profile entry, in canonical order.
pub const PROFILE_RANGES: [ParamRange; 32] = [
    ParamRange::new("boostTime", 0.0, 10.0),
    ParamRange::new("turnDelay", 0.0, 10.0),
    ParamRange::new("turnFactor", 0.0, 100.0),
    ParamRange::new("navigationConstant", 0.0, 100.0),
    ParamRange::new("terminalDistance", 0.0, 10_000.0),
    ParamRange::new("updateInterval", 0.0, 1.0),
    ParamRange::new("closeRange", 0.0, 10_000.0),
    ParamRange::new("thrustDirectionFactor", 0.0, 1.0),
    ParamRange::new("velocityAdjustmentRate", 0.0, 1.0),
    ParamRange::new("midcourseAggressiveness", 0.0, 100.0),
    ParamRange::new("predictionUpdateInterval", 0.0, 1.0),
    ParamRange::new("trajectoryLeadFactor", 0.01, 1.0),
    ParamRange::new("terminalAggressiveness", 0.0, 100.0),
    ParamRange::new("interceptProbability", 0.0, 1.0),
    ParamRange::new("g", 0.0, 100.0),
    ParamRange::new("rho0", 0.0, 10.0),
    ParamRange::new("H", 0.0, 200_000.0),
    ParamRange::new("Cd", 0.0, 2.0),
    ParamRange::new("A", 0.0, 100.0),
    ParamRange::new("missDistanceMultiplier", 1.0, 100.0),
    ParamRange::new("missAngleThreshold", 0.0, 180.0),
    ParamRange::new("missMaxDistance", 0.0, 100_000.0),
    ParamRange::new("hitAngleThreshold", 0.0, 180.0),
    ParamRange::new("speedThresholdFactor", 0.0, 2.0),
    ParamRange::new("turnSmoothingFactor", 0.0, 1.0),
    ParamRange::new("minTurnRate", 0.0, std::f64::consts::PI),
    ParamRange::new("maxTurnRate", 0.0, std::f64::consts::PI),
    ParamRange::new("distanceWeight", 0.0, 1.0),
    ParamRange::new("angleWeight", 0.0, 1.0),
    ParamRange::new("speedWeight", 0.0, 1.0),
    ParamRange::new("maxClosingSpeed", 0.0, 10_000.0),
    ParamRange::new("minClosingSpeed", 0.0, 10_000.0),
];

impl Default for ConstantsProfile {
    fn default() -> Self {
        Self::trajectory()
    }
}

impl ConstantsProfile {
    /// Preset tuned for the iterative trajectory predictor.
    pub fn trajectory() -> Self {
        Self {
            boost_time: 0.3,
            turn_delay: 0.1,
            turn_factor: 8.0,
            navigation_constant: 25.0,
            terminal_distance: 300.0,
            update_interval: 0.002,
            close_range: 150.0,
            thrust_direction_factor: 0.995,
            velocity_adjustment_rate: 0.98,
            midcourse_aggressiveness: 20.0,
            prediction_update_interval: 0.05,
            trajectory_lead_factor: 0.4,
            terminal_aggressiveness: 40.0,
            intercept_probability: 0.85,
            gravity: 9.81,
            sea_level_density: 1.225,
            scale_height: 7400.0,
            drag_coefficient: 0.5,
            reference_area: 0.1,
            miss_distance_multiplier: 1.1,
            miss_angle_threshold: 20.0,
            miss_max_distance: 2000.0,
            hit_angle_threshold: 170.0,
            speed_threshold_factor: 0.98,
            turn_smoothing_factor: 0.3,
            min_turn_rate: 0.3,
            max_turn_rate: 0.6,
            distance_weight: 0.4,
            angle_weight: 0.3,
            speed_weight: 0.3,
            max_closing_speed: 500.0,
            min_closing_speed: 50.0,
        }
    }

    /// Preset tuned for the closed-form lead predictor.
    pub fn lead() -> Self {
        Self {
            boost_time: 0.5,
            turn_delay: 0.2,
            turn_factor: 8.0,
            navigation_constant: 12.0,
            terminal_distance: 800.0,
            update_interval: 0.01,
            close_range: 500.0,
            thrust_direction_factor: 1.0,
            velocity_adjustment_rate: 0.7,
            midcourse_aggressiveness: 20.0,
            prediction_update_interval: 0.01,
            trajectory_lead_factor: 1.0,
            terminal_aggressiveness: 16.0,
            intercept_probability: 1.0,
            gravity: 9.81,
            sea_level_density: 1.225,
            scale_height: 7400.0,
            drag_coefficient: 0.5,
            reference_area: 0.1,
            miss_distance_multiplier: 2.0,
            miss_angle_threshold: 90.0,
            miss_max_distance: 2000.0,
            hit_angle_threshold: 180.0,
            speed_threshold_factor: 0.95,
            turn_smoothing_factor: 0.6,
            min_turn_rate: 0.15,
            max_turn_rate: 0.3,
            distance_weight: 0.3,
            angle_weight: 0.4,
            speed_weight: 0.3,
            max_closing_speed: 800.0,
            min_closing_speed: 100.0,
        }
    }

    /// Look up a preset by name (`"trajectory"` or `"lead"`).
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match InterceptType::from_name(name) {
            Some(kind) => Ok(Self::for_intercept_type(kind)),
            None => Err(ConfigError::UnknownPreset(name.to_string())),
        }
    }

    pub fn for_intercept_type(kind: InterceptType) -> Self {
        match kind {
            InterceptType::Trajectory => Self::trajectory(),
            InterceptType::Lead => Self::lead(),
        }
    }

    /// Range entry for a constant name.
    pub fn range(name: &str) -> Option<&'static ParamRange> {
        PROFILE_RANGES.iter().find(|r| r.name == name)
    }

    /// All entries as `(name, value)` pairs in canonical order.
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        PROFILE_RANGES
            .iter()
            .filter_map(|r| self.get(r.name).map(|v| (r.name, v)))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        let mut copy = *self;
        copy.slot(name).map(|v| *v)
    }

    /// Set one constant. Out-of-range or non-finite values are replaced by
    /// the same entry of `defaults` with a warning. Returns the stored value.
    pub fn set(
        &mut self,
        name: &str,
        value: f64,
        defaults: &ConstantsProfile,
    ) -> Result<f64, ConfigError> {
        let range = Self::range(name).ok_or_else(|| ConfigError::UnknownConstant(name.into()))?;
        let fallback = defaults
            .get(name)
            .ok_or_else(|| ConfigError::UnknownConstant(name.into()))?;
        let stored = range.sanitize(value, fallback);
        let slot = self
            .slot(name)
            .ok_or_else(|| ConfigError::UnknownConstant(name.into()))?;
        *slot = stored;
        Ok(stored)
    }

    /// Copy of `self` with every entry range-checked against `defaults`.
    pub fn validated(mut self, defaults: &ConstantsProfile) -> Self {
        for range in PROFILE_RANGES.iter() {
            let (Some(value), Some(fallback)) = (self.get(range.name), defaults.get(range.name))
            else {
                continue;
            };
            if let Some(slot) = self.slot(range.name) {
                *slot = range.sanitize(value, fallback);
            }
        }
        if self.min_turn_rate > self.max_turn_rate {
            tracing::warn!(
                min = self.min_turn_rate,
                max = self.max_turn_rate,
                "minTurnRate exceeds maxTurnRate; restoring defaults"
            );
            self.min_turn_rate = defaults.min_turn_rate;
            self.max_turn_rate = defaults.max_turn_rate;
        }
        if self.min_closing_speed > self.max_closing_speed {
            tracing::warn!(
                min = self.min_closing_speed,
                max = self.max_closing_speed,
                "minClosingSpeed exceeds maxClosingSpeed; restoring defaults"
            );
            self.min_closing_speed = defaults.min_closing_speed;
            self.max_closing_speed = defaults.max_closing_speed;
        }
        self
    }

    fn slot(&mut self, name: &str) -> Option<&mut f64> {
        let slot = match name {
            "boostTime" => &mut self.boost_time,
            "turnDelay" => &mut self.turn_delay,
            "turnFactor" => &mut self.turn_factor,
            "navigationConstant" => &mut self.navigation_constant,
            "terminalDistance" => &mut self.terminal_distance,
            "updateInterval" => &mut self.update_interval,
            "closeRange" => &mut self.close_range,
            "thrustDirectionFactor" => &mut self.thrust_direction_factor,
            "velocityAdjustmentRate" => &mut self.velocity_adjustment_rate,
            "midcourseAggressiveness" => &mut self.midcourse_aggressiveness,
            "predictionUpdateInterval" => &mut self.prediction_update_interval,
            "trajectoryLeadFactor" => &mut self.trajectory_lead_factor,
            "terminalAggressiveness" => &mut self.terminal_aggressiveness,
            "interceptProbability" => &mut self.intercept_probability,
            "g" => &mut self.gravity,
            "rho0" => &mut self.sea_level_density,
            "H" => &mut self.scale_height,
            "Cd" => &mut self.drag_coefficient,
            "A" => &mut self.reference_area,
            "missDistanceMultiplier" => &mut self.miss_distance_multiplier,
            "missAngleThreshold" => &mut self.miss_angle_threshold,
            "missMaxDistance" => &mut self.miss_max_distance,
            "hitAngleThreshold" => &mut self.hit_angle_threshold,
            "speedThresholdFactor" => &mut self.speed_threshold_factor,
            "turnSmoothingFactor" => &mut self.turn_smoothing_factor,
            "minTurnRate" => &mut self.min_turn_rate,
            "maxTurnRate" => &mut self.max_turn_rate,
            "distanceWeight" => &mut self.distance_weight,
            "angleWeight" => &mut self.angle_weight,
            "speedWeight" => &mut self.speed_weight,
            "maxClosingSpeed" => &mut self.max_closing_speed,
            "minClosingSpeed" => &mut self.min_closing_speed,
            _ => return None,
        };
        Some(slot)
    }
}
