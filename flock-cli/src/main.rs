use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use flock_cli::{load_config, run_headless, HeadlessOptions, Scenario};
use flock_core::{rng::entropy_seed, SimulationConfig, UpdateOrder};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless flocking simulation", long_about = None)]
struct Args {
    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Seed for the noise source; a random seed is logged when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with simulation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file with scripted pointer, spawn and highlight events
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Write one JSON frame per line to this file, or '-' for stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Milliseconds per tick (defaults to 1000 / target tick rate)
    #[arg(long)]
    dt: Option<f32>,

    /// Override the world width
    #[arg(long)]
    width: Option<f32>,

    /// Override the world height
    #[arg(long)]
    height: Option<f32>,

    /// Read neighbor positions from the start of each tick instead of in place
    #[arg(long)]
    snapshot: bool,

    /// Log a summary every N ticks (0 to disable)
    #[arg(long, default_value_t = 60)]
    log_every: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn open_output(path: &Path) -> Result<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdout().lock()));
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(width) = args.width {
        config.world_width = width;
    }
    if let Some(height) = args.height {
        config.world_height = height;
    }
    if args.snapshot {
        config.update_order = UpdateOrder::Snapshot;
    }
    config.validate().context("Invalid simulation configuration")?;

    let seed = match args.seed {
        Some(seed) => seed,
        None => entropy_seed().context("Failed to read a random seed")?,
    };
    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    let tick_millis = args
        .dt
        .unwrap_or(1000.0 / config.target_tick_rate as f32);
    if !(tick_millis.is_finite() && tick_millis > 0.0) {
        anyhow::bail!("--dt must be a positive number of milliseconds, got {}", tick_millis);
    }

    log::info!("Flock simulation starting...");
    log::info!("Seed: {}", seed);
    log::info!(
        "World: {}x{}, {} boids, {:.2} ms per tick, {:?} updates",
        config.world_width,
        config.world_height,
        config.initial_boids,
        tick_millis,
        config.update_order
    );
    if !scenario.is_empty() {
        log::info!("Scenario: {} events", scenario.events.len());
    }

    let options = HeadlessOptions {
        width: config.world_width,
        height: config.world_height,
        tick_millis,
        max_ticks: args.ticks,
        log_every: args.log_every,
    };
    let sink = args.output.as_deref().map(open_output).transpose()?;

    let (outcome, _) = run_headless(config, seed, options, scenario, sink)
        .context("Simulation error")?;

    log::info!(
        "Finished {} ticks: {} boids, {} obstacles, {} frames written",
        outcome.stats.ticks,
        outcome.boid_count,
        outcome.obstacle_count,
        outcome.report.frames_written
    );

    Ok(())
}
