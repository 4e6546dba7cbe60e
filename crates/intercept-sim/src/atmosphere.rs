//! Air density with an altitude-quantized cache.
//!
//! density = rho0 * exp(-y / H) * (T0 / T(y)), with T(y) = T0 * exp(-y / (7H)).

use std::collections::HashMap;

use intercept_core::constants::{
    DENSITY_CACHE_STEP, MAX_SCALE_HEIGHT, SEA_LEVEL_TEMPERATURE, TEMPERATURE_SCALE_FACTOR,
};
use intercept_core::enums::AtmosphereModel;
use intercept_core::profile::ConstantsProfile;

/// Exponential-model density at `altitude`, uncached.
pub fn exponential_density(altitude: f64, sea_level_density: f64, scale_height: f64) -> f64 {
    let temperature =
        SEA_LEVEL_TEMPERATURE * (-altitude / (TEMPERATURE_SCALE_FACTOR * scale_height)).exp();
    sea_level_density * (-altitude / scale_height).exp() * (SEA_LEVEL_TEMPERATURE / temperature)
}

/// Densities keyed by altitude bucket (`round(y / 100)`).
///
/// Each bucket stores the density at the bucket's own altitude, so every
/// query in a bucket returns the same value regardless of query order.
#[derive(Debug, Default, Clone)]
pub struct AirDensityCache {
    entries: HashMap<i64, f64>,
}

impl AirDensityCache {
    pub fn bucket(altitude: f64) -> i64 {
        (altitude / DENSITY_CACHE_STEP).round() as i64
    }

    pub fn get_or_insert_with(&mut self, bucket: i64, compute: impl FnOnce() -> f64) -> f64 {
        *self.entries.entry(bucket).or_insert_with(compute)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Selected density model plus its cache.
///
/// The cache is only valid for one `(rho0, H)` pair: clear it whenever the
/// model, the profile or the scene is replaced.
#[derive(Debug, Clone)]
pub struct Atmosphere {
    model: AtmosphereModel,
    cache: AirDensityCache,
    warned_scale_height: bool,
}

impl Atmosphere {
    pub fn new(model: AtmosphereModel) -> Self {
        Self {
            model,
            cache: AirDensityCache::default(),
            warned_scale_height: false,
        }
    }

    pub fn model(&self) -> AtmosphereModel {
        self.model
    }

    pub fn set_model(&mut self, model: AtmosphereModel) {
        self.model = model;
        self.clear_cache();
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.warned_scale_height = false;
    }

    pub fn cache(&self) -> &AirDensityCache {
        &self.cache
    }

    /// Air density (kg/m³) at `altitude`. Negative altitudes read as sea level.
    ///
    /// A scale height outside (0, 100 km] degrades to `rho0` with a single
    /// warning per cache lifetime; such values are not cached.
    pub fn density(&mut self, altitude: f64, profile: &ConstantsProfile) -> f64 {
        match self.model {
            AtmosphereModel::None => 0.0,
            AtmosphereModel::Exponential => {
                let rho0 = profile.sea_level_density;
                let h = profile.scale_height;
                if !(h > 0.0 && h <= MAX_SCALE_HEIGHT) {
                    if !self.warned_scale_height {
                        tracing::warn!(scale_height = h, "unrealistic scale height; using rho0");
                        self.warned_scale_height = true;
                    }
                    return rho0;
                }
                let bucket = AirDensityCache::bucket(altitude.max(0.0));
                self.cache.get_or_insert_with(bucket, || {
                    exponential_density(bucket as f64 * DENSITY_CACHE_STEP, rho0, h)
                })
            }
        }
    }
}
