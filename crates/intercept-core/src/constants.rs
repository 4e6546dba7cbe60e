//! Fixed simulation constants.
//!
//! Tunable guidance scalars live in [`crate::profile::ConstantsProfile`];
//! the values here are structural and never change at runtime.

// --- Timing ---

/// Largest integration step (seconds). Longer frame deltas are clamped.
pub const MAX_DT: f64 = 0.1;

/// Interval between recorded trail points (seconds).
pub const TRAIL_INTERVAL_SECS: f64 = 0.1;

// --- World ---

/// Side length of the square launch grid (meters), centered on the origin.
pub const GRID_SIZE: f64 = 10_000.0;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

// --- Atmosphere ---

/// Sea-level reference temperature (K).
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15;

/// Altitude quantization of the density cache (meters).
pub const DENSITY_CACHE_STEP: f64 = 100.0;

/// Largest accepted scale height (meters).
pub const MAX_SCALE_HEIGHT: f64 = 100_000.0;

/// Temperature falls off with a scale this many times the density scale height.
pub const TEMPERATURE_SCALE_FACTOR: f64 = 7.0;

// --- Trajectory predictor ---

/// Upper bound on time-of-flight refinements.
pub const TRAJECTORY_MAX_ITERATIONS: usize = 15;

/// Integration sub-steps when propagating the target.
pub const TRAJECTORY_SUBSTEPS: usize = 30;

/// Refinement stops once successive time estimates differ by less than this (s).
pub const TRAJECTORY_CONVERGENCE_SECS: f64 = 0.05;

/// Floor on the interceptor speed in the initial time-of-flight guess (m/s).
pub const MIN_PREDICTION_SPEED: f64 = 100.0;

// --- Lead predictor ---

/// Below this |a| the intercept quadratic is solved as linear.
pub const LEAD_QUADRATIC_EPSILON: f64 = 1e-6;

/// Smallest lead time (seconds).
pub const LEAD_MIN_TIME_SECS: f64 = 0.1;

/// Inside this many kill radii the lead predictor aims straight at the target.
pub const CLOSE_HOMING_RADIUS_FACTOR: f64 = 2.0;

// --- Steering ---

/// Weight of the lead direction in the midcourse blend.
pub const MIDCOURSE_LEAD_WEIGHT: f64 = 0.7;

/// Fraction of time-to-go used for the midcourse lead offset.
pub const MIDCOURSE_LEAD_TIME_FACTOR: f64 = 0.8;

/// Floor on relative speed when estimating midcourse time-to-go (m/s).
pub const MIDCOURSE_MIN_RELATIVE_SPEED: f64 = 10.0;

/// Cap on the per-tick post-acceleration correction turn.
pub const CORRECTION_MAX_TURN: f64 = 0.2;

/// Range inside which the velocity correction is boosted (meters).
pub const CORRECTION_BOOST_RANGE: f64 = 1000.0;

// --- Outcome classification ---

/// Separation growth over the running minimum that counts as diverging (meters).
pub const TRAJECTORY_MISS_HYSTERESIS: f64 = 5.0;

/// Diagnostic: distances beyond this many kill radii count as "too far".
pub const MISS_REASON_DISTANCE_FACTOR: f64 = 1.5;

/// Diagnostic: interceptor slower than this fraction of target speed is "too slow".
pub const MISS_REASON_SPEED_FACTOR: f64 = 0.8;

// --- Advisory hit probability ---

/// "Very close" threshold in kill radii.
pub const HIT_CHANCE_CLOSE_FACTOR: f64 = 1.2;

/// "Well aligned" threshold (degrees).
pub const HIT_CHANCE_CLOSE_ANGLE_DEG: f64 = 30.0;

/// Probability floor when very close and aligned.
pub const HIT_CHANCE_CLOSE_FLOOR: f64 = 0.95;

/// "Far" threshold in kill radii.
pub const HIT_CHANCE_FAR_FACTOR: f64 = 20.0;

/// Probability ceiling when far.
pub const HIT_CHANCE_FAR_CEILING: f64 = 0.1;

// --- Trajectory preview ---

/// Integration steps in an interceptor path preview.
pub const PREVIEW_STEPS: usize = 100;

/// Time horizon of an interceptor path preview (seconds).
pub const PREVIEW_HORIZON_SECS: f64 = 10.0;
