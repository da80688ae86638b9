use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use flock_core::{seeded_rng, RunStats, Simulation, SimulationConfig};

pub mod headless;
pub mod scenario;

pub use headless::{HeadlessDisplay, HeadlessOptions, HeadlessReport};
pub use scenario::{Scenario, ScenarioEvent};

/// Offset separating the seeding-position stream from the noise stream
const POSITION_STREAM_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;

/// Summary of a finished headless run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub stats: RunStats,
    pub report: HeadlessReport,
    pub boid_count: usize,
    pub obstacle_count: usize,
}

/// Read a simulation config from JSON; missing fields keep their defaults
pub fn load_config(path: &Path) -> Result<SimulationConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: SimulationConfig = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    Ok(config)
}

/// Seed a simulation from `seed` and drive it with a headless display
pub fn run_headless<W: Write>(
    config: SimulationConfig,
    seed: u64,
    options: HeadlessOptions,
    scenario: Scenario,
    sink: Option<W>,
) -> Result<(RunOutcome, Option<W>)> {
    let position_rng = seeded_rng(seed.wrapping_add(POSITION_STREAM_OFFSET));
    let mut display = HeadlessDisplay::new(options, scenario, position_rng, sink);

    let mut simulation = Simulation::from_adapter(config, seeded_rng(seed), &mut display)
        .context("Invalid simulation configuration")?;
    let stats = simulation
        .run(&mut display)
        .context("Display sent input the simulation cannot apply")?;

    let (report, sink) = display.finish()?;
    let outcome = RunOutcome {
        stats,
        report,
        boid_count: simulation.boids().len(),
        obstacle_count: simulation.obstacles().len(),
    };
    Ok((outcome, sink))
}
