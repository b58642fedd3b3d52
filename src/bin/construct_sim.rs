//! Construct Sim - headless runner
//!
//! Run with: `cargo run --bin construct_sim -- [CONFIG] --steps 600 --thrust 0 12 0`
//!
//! Assembles a construct from a JSON config (defaults when omitted), applies a
//! constant thrust command and ticks it at a fixed rate, printing a JSON state
//! snapshot every `--every` ticks. Log verbosity follows `RUST_LOG`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use construct_sim_engine::game::{Construct, SimulationConfig};
use construct_sim_engine::physics::{MotionState, TickOutcome};

#[derive(Parser, Debug)]
#[command(name = "construct_sim", about = "Headless construct kinematics runner")]
struct Cli {
    /// Simulation config (JSON). Built-in defaults when omitted.
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    steps: u32,

    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Commanded acceleration (m/s²)
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    thrust: Option<Vec<f32>>,

    /// Commanded angular acceleration
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    rotation: Option<Vec<f32>>,

    /// Print a snapshot every N ticks
    #[arg(long, default_value_t = 60)]
    every: u32,
}

/// One line of output.
#[derive(Serialize)]
struct Snapshot<'a> {
    tick: u32,
    time: f32,
    altitude: f32,
    apparent_mass: f32,
    state: &'a MotionState,
}

fn vec3_arg(values: Option<Vec<f32>>) -> Vec3 {
    match values.as_deref() {
        Some([x, y, z]) => Vec3::new(*x, *y, *z),
        _ => Vec3::ZERO,
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            tracing::info!("no config given, using defaults");
            SimulationConfig::default()
        }
    };

    let universe = Arc::new(config.universe.clone());
    let mut construct = Construct::from_config(universe, &config);
    construct.set_thrust(vec3_arg(cli.thrust));
    construct.set_rotation(vec3_arg(cli.rotation));

    tracing::info!(
        steps = cli.steps,
        dt = cli.dt,
        elements = construct.elements().len(),
        "starting simulation"
    );

    let every = cli.every.max(1);
    let mut arrests = 0u32;
    for tick in 1..=cli.steps {
        if construct.tick(cli.dt) == TickOutcome::Arrested {
            arrests += 1;
        }
        if tick % every == 0 || tick == cli.steps {
            let altitude = construct.script().get_altitude();
            let snapshot = Snapshot {
                tick,
                time: tick as f32 * cli.dt,
                altitude,
                apparent_mass: construct.apparent_mass(),
                state: construct.engine().state(),
            };
            println!("{}", serde_json::to_string(&snapshot)?);
        }
    }

    tracing::info!(arrests, "simulation finished");
    Ok(())
}
