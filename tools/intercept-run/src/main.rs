//! intercept-run: headless scenario runner for the intercept simulation.
//!
//! Usage:
//!   intercept-run --preset lead --interceptors 3 --launch-interval 2
//!   intercept-run --config scenario.json --snapshots > ticks.jsonl
//!
//! Logs go to stderr (filter with RUST_LOG); stdout carries JSON only.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use intercept_core::commands::Command;
use intercept_core::enums::{EngagementResult, InterceptType, Outcome};
use intercept_core::events::{MissDiagnostic, SimEvent};
use intercept_core::profile::ConstantsProfile;
use intercept_sim::engine::{SimConfig, SimulationEngine};

#[derive(Parser)]
#[command(name = "intercept-run")]
#[command(about = "Run one ballistic target engagement and print a JSON summary")]
struct Args {
    /// JSON scenario file (camelCase parameter names)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Constants preset and predictor: trajectory or lead
    #[arg(long)]
    preset: Option<String>,

    /// RNG seed for hit rolls and launch sites
    #[arg(long)]
    seed: Option<u64>,

    /// Number of interceptors to fire
    #[arg(long, default_value_t = 3)]
    interceptors: u32,

    /// Seconds between interceptor launches
    #[arg(long, default_value_t = 2.0)]
    launch_interval: f64,

    /// Frame step in seconds (clamped to 0.1 by the engine)
    #[arg(long, default_value_t = 1.0 / 60.0)]
    frame_dt: f64,

    /// Give up after this much simulated time
    #[arg(long, default_value_t = 300.0)]
    max_time: f64,

    /// Emit one JSON snapshot per tick before the summary
    #[arg(long)]
    snapshots: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    result: Option<EngagementResult>,
    elapsed_secs: f64,
    ticks: u64,
    intercept_type: InterceptType,
    target_max_height: f64,
    target_max_distance: f64,
    interceptors: Vec<InterceptorSummary>,
    warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InterceptorSummary {
    id: u32,
    outcome: Option<Outcome>,
    min_distance: f64,
    diagnostic: Option<MissDiagnostic>,
}

/// Reject timing flags that would stall or never end the run loop.
fn check_timing(args: &Args) -> Result<()> {
    if !(args.frame_dt.is_finite() && args.frame_dt > 0.0) {
        bail!("--frame-dt must be a positive number of seconds, got {}", args.frame_dt);
    }
    if !(args.launch_interval.is_finite() && args.launch_interval > 0.0) {
        bail!(
            "--launch-interval must be a positive number of seconds, got {}",
            args.launch_interval
        );
    }
    if !(args.max_time.is_finite() && args.max_time > 0.0) {
        bail!("--max-time must be a positive number of seconds, got {}", args.max_time);
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<SimConfig> {
    check_timing(args)?;
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            SimConfig::from_json(&json)
                .with_context(|| format!("invalid scenario {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(name) = &args.preset {
        config.constants = ConstantsProfile::preset(name)?;
        config.intercept_type = InterceptType::from_name(name).unwrap_or(config.intercept_type);
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(
        seed = config.seed,
        intercept_type = ?config.intercept_type,
        atmosphere = ?config.atmosphere_model,
        "starting engagement"
    );

    let mut engine = SimulationEngine::new(config);
    engine.queue_command(Command::LaunchTarget);

    let mut fired = 0;
    let mut last_launch = f64::NEG_INFINITY;
    let mut result = None;
    let mut warnings = Vec::new();
    let mut max_height: f64 = 0.0;
    let mut max_distance: f64 = 0.0;

    while engine.time().elapsed_secs < args.max_time {
        let now = engine.time().elapsed_secs;
        let active = engine.interceptors().iter().filter(|i| i.body.active).count() as u32;
        if fired < args.interceptors
            && now - last_launch >= args.launch_interval
            && engine.target().is_some()
            && active < engine.config().max_interceptors
        {
            engine.queue_command(Command::LaunchInterceptor { site: None });
            fired += 1;
            last_launch = now;
        }

        let snapshot = engine.tick(args.frame_dt);
        if let Some(target) = &snapshot.target {
            max_height = max_height.max(target.max_height);
            max_distance = max_distance.max(target.max_distance);
        }
        if args.snapshots {
            println!("{}", serde_json::to_string(&snapshot)?);
        }
        for event in &snapshot.events {
            match event {
                SimEvent::EngagementEnded { result: r, .. } => result = Some(*r),
                SimEvent::Warning { message } => warnings.push(message.clone()),
                _ => {}
            }
        }
        if result.is_some() {
            break;
        }
    }

    let time = engine.time();
    let summary = Summary {
        result,
        elapsed_secs: time.elapsed_secs,
        ticks: time.tick,
        intercept_type: engine.config().intercept_type,
        target_max_height: max_height,
        target_max_distance: max_distance,
        interceptors: engine
            .interceptors()
            .iter()
            .map(|i| InterceptorSummary {
                id: i.id,
                outcome: i.outcome,
                min_distance: i.min_distance_to_target,
                diagnostic: i.diagnostic,
            })
            .collect(),
        warnings,
    };
    info!(result = ?summary.result, elapsed = summary.elapsed_secs, "engagement finished");
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("intercept-run").chain(extra.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults_pass_timing_check() {
        assert!(check_timing(&parse(&[])).is_ok());
    }

    #[test]
    fn test_non_positive_frame_dt_rejected() {
        assert!(check_timing(&parse(&["--frame-dt", "0"])).is_err());
        assert!(check_timing(&parse(&["--frame-dt=-0.5"])).is_err());
        assert!(check_timing(&parse(&["--frame-dt", "NaN"])).is_err());
        assert!(load_config(&parse(&["--frame-dt", "0"])).is_err());
    }

    #[test]
    fn test_bad_launch_interval_and_max_time_rejected() {
        assert!(check_timing(&parse(&["--launch-interval", "0"])).is_err());
        assert!(check_timing(&parse(&["--launch-interval", "inf"])).is_err());
        assert!(check_timing(&parse(&["--max-time=-1"])).is_err());
    }

    #[test]
    fn test_preset_flag_selects_predictor() {
        let config = load_config(&parse(&["--preset", "lead", "--seed", "9"])).unwrap();
        assert_eq!(config.intercept_type, InterceptType::Lead);
        assert_eq!(config.constants, ConstantsProfile::lead());
        assert_eq!(config.seed, 9);
        assert!(load_config(&parse(&["--preset", "bogus"])).is_err());
    }
}
