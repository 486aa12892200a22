//! tankfire: headless driver for the TANKFIRE simulation and solver.
//!
//! Usage:
//!   tankfire simulate --scenario arena.json --ticks 600 --fire-at 30
//!   tankfire solve --range 50 --angle 30
//!
//! JSON goes to stdout; logs go to stderr (filter with RUST_LOG).

use std::path::PathBuf;
use std::process;

use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tankfire_ballistics::{predict_path, solve_launch_force, TrajectorySample};
use tankfire_core::commands::PlayerCommand;
use tankfire_core::config::ScenarioConfig;
use tankfire_core::constants::{GRAVITY, GROUND_HEIGHT, PREVIEW_SAMPLE_COUNT, PREVIEW_TIME_STEP};
use tankfire_core::types::{direction_from_yaw_pitch, Vector3};
use tankfire_sim::arena::ArenaGeometry;
use tankfire_sim::{SimConfig, SimulationEngine};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "simulate" => cmd_simulate(&args[2..]),
        "solve" => cmd_solve(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tankfire=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    eprintln!(
        "tankfire: TANKFIRE headless simulation and ballistics tool\n\
         \n\
         Commands:\n\
         \n\
         simulate  Run a scenario and print the final snapshot as JSON\n\
         \n\
           --scenario <path>  Scenario JSON file (optional, default: built-in arena)\n\
           --ticks <N>        Ticks to run at 60 Hz (default: 600)\n\
           --seed <S>         Override the scenario seed\n\
           --fire-at <T>      Charge and fire the player cannon on tick T\n\
         \n\
         solve     Print the launch speed and predicted arc as JSON\n\
         \n\
           --range <R>        Target range in meters (required)\n\
           --angle <A>        Launch elevation in degrees (required)\n\
           --gravity <G>      Gravity magnitude (default: 9.81)\n\
           --samples <N>      Arc samples (default: 60)\n\
           --step <DT>        Seconds between samples (default: 0.1)\n\
         \n\
         Examples:\n\
         \n\
           tankfire simulate --ticks 1200 --fire-at 30\n\
           tankfire solve --range 50 --angle 30\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(&args[i + 1]);
        }
    }
    None
}

/// Parse `flag`'s value, falling back to `default` when absent.
/// A present but malformed value is an error.
fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str, default: Option<T>) -> T {
    match flag_value(args, flag) {
        Some(raw) => match raw.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                eprintln!("Error: invalid value for {flag}: {raw}");
                process::exit(1);
            }
        },
        None => match default {
            Some(value) => value,
            None => {
                eprintln!("Error: {flag} is required");
                process::exit(1);
            }
        },
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing output: {e}");
            process::exit(1);
        }
    }
}

// --- Simulate command ---

fn cmd_simulate(args: &[String]) {
    let scenario = match flag_value(args, "--scenario").map(PathBuf::from) {
        Some(path) => match ScenarioConfig::load(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading scenario {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => ScenarioConfig::default(),
    };

    let ticks: u64 = parse_flag(args, "--ticks", Some(600));
    let seed: u64 = parse_flag(args, "--seed", Some(scenario.seed));
    let fire_at: Option<u64> = flag_value(args, "--fire-at").map(|_| parse_flag(args, "--fire-at", None));

    let mut engine = match SimulationEngine::new(SimConfig { seed, scenario }) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    info!(ticks, seed, "simulation starting");
    let mut snapshot = engine.tick();
    for tick in 1..ticks {
        if fire_at == Some(tick) {
            engine.queue_commands([PlayerCommand::BeginCharge, PlayerCommand::ReleaseFire]);
        }
        snapshot = engine.tick();
    }
    info!(
        tick = snapshot.time.tick,
        generation = snapshot.generation,
        phase = ?snapshot.phase,
        "simulation finished"
    );

    print_json(&snapshot);
}

// --- Solve command ---

#[derive(Serialize)]
struct SolveReport {
    range: f64,
    angle_degrees: f64,
    gravity: f64,
    launch_speed: f64,
    launch_velocity: Vector3,
    arc: TrajectorySample,
}

fn cmd_solve(args: &[String]) {
    let range: f64 = parse_flag(args, "--range", None);
    let angle_degrees: f64 = parse_flag(args, "--angle", None);
    let gravity: f64 = parse_flag(args, "--gravity", Some(GRAVITY));
    let samples: usize = parse_flag(args, "--samples", Some(PREVIEW_SAMPLE_COUNT));
    let step: f64 = parse_flag(args, "--step", Some(PREVIEW_TIME_STEP));

    let launch_speed = match solve_launch_force(range, angle_degrees, gravity) {
        Ok(speed) => speed,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let launch_velocity = direction_from_yaw_pitch(0.0, angle_degrees) * launch_speed;
    let ground = ArenaGeometry::new(GROUND_HEIGHT, Vec::new());
    let arc = predict_path(Vector3::ZERO, launch_velocity, gravity, samples, step, &ground).collect_sample();
    info!(launch_speed, points = arc.len(), "solved");

    print_json(&SolveReport {
        range,
        angle_degrees,
        gravity,
        launch_speed,
        launch_velocity,
        arc,
    });
}
