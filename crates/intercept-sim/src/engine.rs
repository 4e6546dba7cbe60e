//! Simulation engine: the stepper.
//!
//! `SimulationEngine` owns the target, the interceptors, the clock and the
//! active constants profile. It applies queued commands, steps every body
//! and produces `SimSnapshot`s. Completely headless, enabling deterministic
//! testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use intercept_core::commands::Command;
use intercept_core::components::{DebrisMarker, Interceptor, Target};
use intercept_core::config::sanitize_cap;
use intercept_core::enums::{EngagementResult, MissReason, Outcome};
use intercept_core::events::SimEvent;
use intercept_core::profile::ConstantsProfile;
use intercept_core::state::SimSnapshot;
use intercept_core::types::{SimTime, Vec3};

pub use intercept_core::config::SimConfig;

use crate::atmosphere::Atmosphere;
use crate::classifier::{self, Verdict};
use crate::kinematics;
use crate::launch;
use crate::systems;
use crate::systems::flight::FlightContext;

/// The simulation engine. Owns all dynamic state of one simulation.
pub struct SimulationEngine {
    config: SimConfig,
    profile: ConstantsProfile,
    time: SimTime,
    paused: bool,
    rng: ChaCha8Rng,
    atmosphere: Atmosphere,
    target: Option<Target>,
    /// In launch order; this is also the processing order.
    interceptors: Vec<Interceptor>,
    debris: Vec<DebrisMarker>,
    next_interceptor_id: u32,
    engagement_over: bool,
    command_queue: VecDeque<Command>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create a new engine. The config is validated first.
    pub fn new(config: SimConfig) -> Self {
        let config = config.validated();
        Self {
            profile: config.constants,
            time: SimTime::default(),
            paused: false,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            atmosphere: Atmosphere::new(config.atmosphere_model),
            target: None,
            interceptors: Vec::new(),
            debris: Vec::new(),
            next_interceptor_id: 1,
            engagement_over: false,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            config,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: Command) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.command_queue.extend(commands);
    }

    /// Apply queued commands, advance by `frame_dt` (clamped to 0.1 s) unless
    /// paused, and return the resulting snapshot. A zero, negative or
    /// non-finite `frame_dt` only applies commands.
    pub fn tick(&mut self, frame_dt: f64) -> SimSnapshot {
        self.process_commands();

        let dt = kinematics::clamp_dt(frame_dt);
        if !self.paused && dt > 0.0 {
            self.time.advance(dt);
            self.run_systems(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.time,
            self.paused,
            &self.config,
            &self.profile,
            self.target.as_ref(),
            &self.interceptors,
            &self.debris,
            events,
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current config, including runtime changes to selectors and the cap.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Active constants profile.
    pub fn profile(&self) -> &ConstantsProfile {
        &self.profile
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    pub fn interceptors(&self) -> &[Interceptor] {
        &self.interceptors
    }

    pub fn debris(&self) -> &[DebrisMarker] {
        &self.debris
    }

    pub fn atmosphere(&self) -> &Atmosphere {
        &self.atmosphere
    }

    /// Whether an `EngagementEnded` event has been emitted for the current target.
    pub fn engagement_over(&self) -> bool {
        self.engagement_over
    }

    /// Place a target directly (for tests needing exact geometry).
    #[cfg(test)]
    pub fn insert_target(&mut self, target: Target) {
        self.target = Some(target);
        self.engagement_over = false;
    }

    /// Place an interceptor directly, bypassing launch checks.
    #[cfg(test)]
    pub fn insert_interceptor(&mut self, mut interceptor: Interceptor) {
        interceptor.id = self.next_interceptor_id;
        self.next_interceptor_id += 1;
        self.interceptors.push(interceptor);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: Command) {
        match command {
            Command::LaunchTarget => self.launch_target(),
            Command::LaunchInterceptor { site } => self.launch_interceptor(site),
            Command::Reset => {
                self.clear_scene();
                info!("simulation reset");
            }
            Command::Pause => self.paused = true,
            Command::Resume => self.paused = false,
            Command::ApplyConstantsPreset { name } => match ConstantsProfile::preset(&name) {
                Ok(profile) => self.apply_profile(profile, name),
                Err(err) => self.reject(err.to_string()),
            },
            Command::SetMaxInterceptors { count } => {
                let cap = sanitize_cap(count);
                if cap != count {
                    self.reject(format!("maxInterceptors {count} out of range; using {cap}"));
                }
                self.config.max_interceptors = cap;
            }
            Command::SetConstant { name, value } => {
                let defaults = ConstantsProfile::for_intercept_type(self.config.intercept_type);
                match self.profile.set(&name, value, &defaults) {
                    Ok(stored) => {
                        if stored != value {
                            self.reject(format!("{name}={value} out of range; using {stored}"));
                        }
                        if matches!(name.as_str(), "rho0" | "H") {
                            self.atmosphere.clear_cache();
                        }
                    }
                    Err(err) => self.reject(err.to_string()),
                }
            }
            Command::SetInterceptType { intercept_type } => {
                self.config.intercept_type = intercept_type;
                let profile = ConstantsProfile::for_intercept_type(intercept_type);
                self.apply_profile(profile, intercept_type.preset_name().to_string());
            }
            Command::SetAtmosphereModel { model } => {
                self.config.atmosphere_model = model;
                self.atmosphere.set_model(model);
            }
        }
    }

    /// Remove every body, zero the clock and clear the density cache.
    fn clear_scene(&mut self) {
        self.target = None;
        self.interceptors.clear();
        self.debris.clear();
        self.atmosphere.clear_cache();
        self.time = SimTime::default();
        self.next_interceptor_id = 1;
        self.engagement_over = false;
    }

    /// Replace the whole profile at once.
    fn apply_profile(&mut self, profile: ConstantsProfile, name: String) {
        self.profile = profile;
        self.atmosphere.clear_cache();
        info!(preset = %name, "constants preset applied");
        self.events.push(SimEvent::PresetApplied { name });
    }

    fn launch_target(&mut self) {
        self.clear_scene();
        let target = launch::build_target(&self.config.target, self.time.elapsed_secs);
        info!(
            speed = self.config.target.speed,
            angle_deg = self.config.target.angle_deg,
            "target launched"
        );
        self.events.push(SimEvent::TargetLaunched {
            position: target.body.position,
            velocity: target.body.velocity,
        });
        self.target = Some(target);
    }

    fn launch_interceptor(&mut self, site: Option<Vec3>) {
        let Some(target_body) = self.target.as_ref().map(|t| t.body) else {
            self.reject("no target to intercept".to_string());
            return;
        };
        if self.engagement_over {
            self.reject("engagement already ended".to_string());
            return;
        }
        // The cap covers every interceptor fired at the current target.
        let launched = self.interceptors.len() as u32;
        if launched >= self.config.max_interceptors {
            self.reject(format!(
                "interceptor limit reached ({launched}/{})",
                self.config.max_interceptors
            ));
            return;
        }
        let site = match site {
            Some(site) if site.is_finite() => site,
            Some(site) => {
                self.reject(format!("invalid launch site {site}"));
                return;
            }
            None => launch::random_site(&mut self.rng),
        };

        let now = self.time.elapsed_secs;
        let mut interceptor = launch::launch_interceptor(
            self.next_interceptor_id,
            site,
            &self.config.interceptor,
            &self.profile,
            now,
        );
        self.next_interceptor_id += 1;

        let mut ctx = FlightContext {
            profile: &self.profile,
            atmosphere: &mut self.atmosphere,
            intercept_type: self.config.intercept_type,
            kill_radius: self.config.kill_radius,
            launch_speed: self.config.interceptor.v0,
            now,
            dt: 0.0,
        };
        systems::flight::refresh_aim(&mut ctx, &mut interceptor, &target_body);
        systems::flight::refresh_preview(&mut ctx, &mut interceptor);

        info!(id = interceptor.id, x = site.x, z = site.z, "interceptor launched");
        self.events.push(SimEvent::InterceptorLaunched {
            interceptor_id: interceptor.id,
            position: interceptor.body.position,
        });
        self.interceptors.push(interceptor);
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let now = self.time.elapsed_secs;

        // 1. Target flight
        if let Some(target) = self.target.as_mut() {
            let impacted =
                systems::target::advance(target, &self.profile, &mut self.atmosphere, now, dt);
            if impacted {
                let position = target.body.position;
                self.target = None;
                info!(x = position.x, z = position.z, "target reached the ground");
                self.events.push(SimEvent::TargetImpact { position });
                self.end_engagement(EngagementResult::TargetImpacted);
            }
        }

        // 2. Interceptors, sequentially in launch order. A hit removes the
        //    target, and later interceptors are not stepped without one.
        for index in 0..self.interceptors.len() {
            let Some(target_body) = self.target.as_ref().map(|t| t.body) else {
                break;
            };
            let interceptor = &mut self.interceptors[index];
            if !interceptor.body.active {
                continue;
            }

            let mut ctx = FlightContext {
                profile: &self.profile,
                atmosphere: &mut self.atmosphere,
                intercept_type: self.config.intercept_type,
                kill_radius: self.config.kill_radius,
                launch_speed: self.config.interceptor.v0,
                now,
                dt,
            };
            if let Some((from, to)) = systems::flight::step(&mut ctx, interceptor, &target_body) {
                debug!(id = interceptor.id, ?from, ?to, time = now, "guidance phase change");
                self.events.push(SimEvent::PhaseChanged {
                    interceptor_id: interceptor.id,
                    from,
                    to,
                    time_secs: now,
                });
            }

            // 3. Classification
            let kill_radius = self.config.kill_radius;
            let verdict =
                classifier::numerical_fault(interceptor, &target_body, kill_radius, &self.profile)
                    .or_else(|| {
                        classifier::classify(
                            interceptor,
                            &target_body,
                            kill_radius,
                            &self.profile,
                            &mut self.rng,
                        )
                    });
            if let Some(verdict) = verdict {
                self.apply_verdict(index, verdict);
            }
        }

        // 4. Exhaustion
        self.check_exhaustion();
    }

    /// Deactivate a classified interceptor and apply the outcome's effects.
    fn apply_verdict(&mut self, index: usize, verdict: Verdict) {
        let interceptor = &mut self.interceptors[index];
        interceptor.body.active = false;
        interceptor.outcome = Some(verdict.outcome);
        interceptor.diagnostic = verdict.diagnostic;
        interceptor.predicted_path.clear();
        let id = interceptor.id;
        let position = interceptor.body.position;

        match verdict.diagnostic {
            Some(diag) if diag.reason == MissReason::NumericalFault => {
                warn!(id, "non-finite interceptor state; classified as miss");
            }
            Some(diag) => {
                info!(id, outcome = ?verdict.outcome, reason = ?diag.reason, distance = diag.distance, "interceptor missed");
            }
            None => info!(id, outcome = ?verdict.outcome, "interceptor classified"),
        }

        let leaves_debris = match verdict.outcome {
            Outcome::Ground | Outcome::Trajectory => true,
            Outcome::Miss => verdict
                .diagnostic
                .is_some_and(|d| d.reason != MissReason::NumericalFault),
            Outcome::Hit => false,
        };
        if leaves_debris {
            self.debris.push(DebrisMarker {
                interceptor_id: id,
                position: Vec3::new(position.x, position.y.max(0.0), position.z),
                kind: verdict.outcome,
            });
        }

        self.events.push(SimEvent::Classified {
            interceptor_id: id,
            outcome: verdict.outcome,
            position,
            diagnostic: verdict.diagnostic,
        });

        if verdict.outcome == Outcome::Hit {
            if let Some(target) = self.target.as_mut() {
                target.body.active = false;
            }
            self.target = None;
            self.end_engagement(EngagementResult::TargetDestroyed);
        }
    }

    /// End the engagement once the cap is spent and nothing is still flying.
    fn check_exhaustion(&mut self) {
        if self.engagement_over || self.target.is_none() {
            return;
        }
        let launched = self.interceptors.len() as u32;
        let any_active = self.interceptors.iter().any(|i| i.body.active);
        if launched >= self.config.max_interceptors && !any_active {
            self.end_engagement(EngagementResult::InterceptorsExhausted);
        }
    }

    fn end_engagement(&mut self, result: EngagementResult) {
        if self.engagement_over {
            return;
        }
        self.engagement_over = true;
        info!(?result, time = self.time.elapsed_secs, "engagement ended");
        self.events.push(SimEvent::EngagementEnded {
            result,
            time_secs: self.time.elapsed_secs,
        });
    }

    /// Surface a rejected command or replaced value without stopping.
    fn reject(&mut self, message: String) {
        warn!(%message, "command adjusted or rejected");
        self.events.push(SimEvent::Warning { message });
    }
}
