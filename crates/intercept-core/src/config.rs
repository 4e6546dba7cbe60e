//! Validated simulation configuration.
//!
//! Every scalar has a documented range. Invalid input is never fatal: it is
//! replaced by the documented default and a warning is logged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::DEFAULT_SEED;
use crate::enums::{AtmosphereModel, InterceptType};
use crate::error::ConfigError;
use crate::profile::ConstantsProfile;

/// Inclusive accepted range of a named scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(name: &'static str, min: f64, max: f64) -> Self {
        Self { name, min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// `value` if accepted, otherwise `default` with a warning.
    pub fn sanitize(&self, value: f64, default: f64) -> f64 {
        if self.contains(value) {
            value
        } else {
            tracing::warn!(
                param = self.name,
                value,
                min = self.min,
                max = self.max,
                default,
                "parameter out of range; using default"
            );
            default
        }
    }
}

// --- Scalar ranges ---

pub const KILL_RADIUS: ParamRange = ParamRange::new("killRadius", 1.0, 1000.0);
pub const TARGET_SPEED: ParamRange = ParamRange::new("targetSpeed", 0.0, 10_000.0);
pub const TARGET_ANGLE: ParamRange = ParamRange::new("targetAngle", 0.0, 90.0);
pub const TARGET_MASS: ParamRange = ParamRange::new("targetMass", 1.0, 100_000.0);
pub const TARGET_CD: ParamRange = ParamRange::new("targetCd", 0.0, 2.0);
pub const TARGET_AREA: ParamRange = ParamRange::new("targetArea", 0.0, 100.0);
pub const INTERCEPTOR_MASS: ParamRange = ParamRange::new("mass", 1.0, 100_000.0);
pub const INTERCEPTOR_THRUST: ParamRange = ParamRange::new("thrust", 0.0, 10_000_000.0);
pub const INTERCEPTOR_BURN: ParamRange = ParamRange::new("burn", 0.0, 600.0);
pub const INTERCEPTOR_V0: ParamRange = ParamRange::new("v0", 0.0, 5000.0);
pub const MANEUVERABILITY: ParamRange = ParamRange::new("maneuverability", 0.0, 720.0);

/// Smallest and largest interceptor cap.
pub const MAX_INTERCEPTORS_RANGE: (u32, u32) = (1, 10);

/// Launch parameters of the ballistic target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetLaunch {
    /// m/s.
    pub speed: f64,
    /// Elevation above the horizon (degrees).
    pub angle_deg: f64,
    pub mass: f64,
    pub drag_coefficient: f64,
    pub area: f64,
}

impl Default for TargetLaunch {
    fn default() -> Self {
        Self {
            speed: 1000.0,
            angle_deg: 45.0,
            mass: 1000.0,
            drag_coefficient: 0.5,
            area: 0.1,
        }
    }
}

/// Launch parameters shared by every interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterceptorLaunch {
    pub mass: f64,
    /// N.
    pub thrust: f64,
    /// s.
    pub burn_time: f64,
    /// Launch speed straight up (m/s).
    pub v0: f64,
    /// Maximum turn rate (degrees/s).
    pub maneuverability_deg: f64,
}

impl Default for InterceptorLaunch {
    fn default() -> Self {
        Self {
            mass: 500.0,
            thrust: 100_000.0,
            burn_time: 10.0,
            v0: 300.0,
            maneuverability_deg: 30.0,
        }
    }
}

/// Complete configuration of one simulation instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed for hit rolls and random launch sites.
    pub seed: u64,
    pub atmosphere_model: AtmosphereModel,
    pub intercept_type: InterceptType,
    pub max_interceptors: u32,
    /// m.
    pub kill_radius: f64,
    pub target: TargetLaunch,
    pub interceptor: InterceptorLaunch,
    /// Initial constants; defaults to the preset matching `intercept_type`.
    pub constants: ConstantsProfile,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            atmosphere_model: AtmosphereModel::default(),
            intercept_type: InterceptType::default(),
            max_interceptors: 5,
            kill_radius: 20.0,
            target: TargetLaunch::default(),
            interceptor: InterceptorLaunch::default(),
            constants: ConstantsProfile::default(),
        }
    }
}

impl SimConfig {
    /// Copy with every scalar range-checked; offending values become defaults.
    pub fn validated(mut self) -> Self {
        let d = Self::default();
        self.kill_radius = KILL_RADIUS.sanitize(self.kill_radius, d.kill_radius);

        let t = &mut self.target;
        t.speed = TARGET_SPEED.sanitize(t.speed, d.target.speed);
        t.angle_deg = TARGET_ANGLE.sanitize(t.angle_deg, d.target.angle_deg);
        t.mass = TARGET_MASS.sanitize(t.mass, d.target.mass);
        t.drag_coefficient = TARGET_CD.sanitize(t.drag_coefficient, d.target.drag_coefficient);
        t.area = TARGET_AREA.sanitize(t.area, d.target.area);

        let i = &mut self.interceptor;
        i.mass = INTERCEPTOR_MASS.sanitize(i.mass, d.interceptor.mass);
        i.thrust = INTERCEPTOR_THRUST.sanitize(i.thrust, d.interceptor.thrust);
        i.burn_time = INTERCEPTOR_BURN.sanitize(i.burn_time, d.interceptor.burn_time);
        i.v0 = INTERCEPTOR_V0.sanitize(i.v0, d.interceptor.v0);
        i.maneuverability_deg =
            MANEUVERABILITY.sanitize(i.maneuverability_deg, d.interceptor.maneuverability_deg);

        self.max_interceptors = sanitize_cap(self.max_interceptors);
        let preset = ConstantsProfile::for_intercept_type(self.intercept_type);
        self.constants = self.constants.validated(&preset);
        self
    }

    /// Parse a JSON object keyed by the camelCase parameter names, e.g.
    /// `{"targetSpeed": 1200, "interceptType": "lead", "constants": {"H": 8000}}`.
    ///
    /// Only malformed JSON or a non-object document is an error. Missing keys
    /// keep their defaults; bad values are replaced with a warning.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let doc: Value = serde_json::from_str(json)?;
        let map = doc
            .as_object()
            .ok_or_else(|| ConfigError::InvalidDocument("expected a JSON object".into()))?;

        let mut config = Self::default();
        if let Some(seed) = map.get("seed") {
            match seed.as_u64() {
                Some(seed) => config.seed = seed,
                None => tracing::warn!(%seed, "seed is not an unsigned integer; using default"),
            }
        }
        if let Some(name) = read_selector(map, "atmosphereModel") {
            match AtmosphereModel::from_name(&name) {
                Some(model) => config.atmosphere_model = model,
                None => tracing::warn!(%name, "unknown atmosphere model; using default"),
            }
        }
        if let Some(name) = read_selector(map, "interceptType") {
            match InterceptType::from_name(&name) {
                Some(kind) => config.intercept_type = kind,
                None => tracing::warn!(%name, "unknown intercept type; using default"),
            }
        }
        config.constants = ConstantsProfile::for_intercept_type(config.intercept_type);

        if let Some(value) = map.get("maxInterceptors") {
            match number(value) {
                Some(n) if n >= 0.0 && n.fract() == 0.0 => config.max_interceptors = n as u32,
                _ => tracing::warn!(%value, "maxInterceptors is not a whole number; using default"),
            }
        }
        read_number(map, KILL_RADIUS.name, &mut config.kill_radius);
        read_number(map, TARGET_SPEED.name, &mut config.target.speed);
        read_number(map, TARGET_ANGLE.name, &mut config.target.angle_deg);
        read_number(map, TARGET_MASS.name, &mut config.target.mass);
        read_number(map, TARGET_CD.name, &mut config.target.drag_coefficient);
        read_number(map, TARGET_AREA.name, &mut config.target.area);
        read_number(map, INTERCEPTOR_MASS.name, &mut config.interceptor.mass);
        read_number(map, INTERCEPTOR_THRUST.name, &mut config.interceptor.thrust);
        read_number(map, INTERCEPTOR_BURN.name, &mut config.interceptor.burn_time);
        read_number(map, INTERCEPTOR_V0.name, &mut config.interceptor.v0);
        read_number(
            map,
            MANEUVERABILITY.name,
            &mut config.interceptor.maneuverability_deg,
        );

        match map.get("constants") {
            None => {}
            Some(Value::Object(overrides)) => {
                let preset = config.constants;
                for (name, value) in overrides {
                    let Some(value) = number(value) else {
                        tracing::warn!(%name, "constant is not numeric; keeping preset value");
                        continue;
                    };
                    if let Err(err) = config.constants.set(name, value, &preset) {
                        tracing::warn!(%err, "ignoring constant override");
                    }
                }
            }
            Some(other) => tracing::warn!(%other, "constants must be an object; ignoring"),
        }

        Ok(config.validated())
    }
}

/// Clamp an interceptor cap into the accepted range, warning when it moves.
pub fn sanitize_cap(count: u32) -> u32 {
    let (min, max) = MAX_INTERCEPTORS_RANGE;
    if (min..=max).contains(&count) {
        count
    } else {
        let clamped = count.clamp(min, max);
        tracing::warn!(count, clamped, "maxInterceptors out of range; clamping");
        clamped
    }
}

/// Numbers, or strings that parse as numbers.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn read_number(map: &Map<String, Value>, key: &str, slot: &mut f64) {
    let Some(value) = map.get(key) else {
        return;
    };
    match number(value) {
        Some(n) => *slot = n,
        None => tracing::warn!(key, %value, "parameter is not numeric; using default"),
    }
}

fn read_selector(map: &Map<String, Value>, key: &str) -> Option<String> {
    let value = map.get(key)?;
    match value.as_str() {
        Some(s) => Some(s.trim().to_ascii_lowercase()),
        None => {
            tracing::warn!(key, %value, "selector is not a string; using default");
            None
        }
    }
}
