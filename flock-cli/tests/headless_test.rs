use std::fs;

use anyhow::Result;
use flock_cli::{load_config, run_headless, HeadlessOptions, Scenario};
use flock_core::{SimulationConfig, UpdateOrder};
use flock_shared::{Frame, Point};
use tempfile::tempdir;

const SCRIPT: &str = r#"{
    "events": [
        {"tick": 10, "spawn_boid": {"position": {"x": 300.0, "y": 200.0}, "heading": 90.0}},
        {"tick": 20, "spawn_obstacle": {"x": 320.0, "y": 200.0}},
        {"tick": 25, "pointer": {"x": 50.0, "y": 60.0}},
        {"tick": 30, "cycle_highlight": true},
        {"tick": 31, "cycle_highlight": true}
    ]
}"#;

fn small_config() -> SimulationConfig {
    SimulationConfig {
        initial_boids: 20,
        ..SimulationConfig::default()
    }
    .with_world_size(640.0, 400.0)
}

fn options(max_ticks: u64) -> HeadlessOptions {
    HeadlessOptions {
        width: 640.0,
        height: 400.0,
        tick_millis: 16.0,
        max_ticks,
        log_every: 0,
    }
}

fn run_to_frames(config: SimulationConfig, seed: u64, ticks: u64) -> Result<Vec<Frame>> {
    let scenario = Scenario::from_json(SCRIPT)?;
    let sink = Some(Vec::<u8>::new());
    let (outcome, sink) = run_headless(config, seed, options(ticks), scenario, sink)?;
    assert_eq!(outcome.stats.ticks, ticks);

    let output = String::from_utf8(sink.unwrap_or_default())?;
    let frames = output
        .lines()
        .map(|line| serde_json::from_str::<Frame>(line))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(frames)
}

#[test]
fn test_headless_run_follows_scenario() -> Result<()> {
    let frames = run_to_frames(small_config(), 11, 120)?;
    assert_eq!(frames.len(), 120);

    for (index, frame) in frames.iter().enumerate() {
        assert_eq!(frame.summary.tick, index as u64 + 1);
        assert_eq!(frame.summary.boid_count, frame.boids.len());
        assert_eq!(frame.summary.obstacle_count, frame.obstacles.len());
        assert_eq!(
            frame.boids.iter().filter(|sprite| sprite.highlighted).count(),
            1
        );
    }

    assert_eq!(frames[8].summary.boid_count, 20);
    assert_eq!(frames[9].summary.boid_count, 21);
    assert_eq!(frames[18].summary.obstacle_count, 0);
    assert_eq!(frames[19].summary.obstacle_count, 1);
    assert_eq!(frames[19].obstacles[0].centre, Point::new(320.0, 200.0));
    assert_eq!(frames[19].obstacles[0].radius, 15.0);

    assert_eq!(frames[28].detail.map(|detail| detail.index), Some(0));
    assert_eq!(frames[29].detail.map(|detail| detail.index), Some(1));
    assert_eq!(frames[30].detail.map(|detail| detail.index), Some(2));
    assert!(frames[30].boids[2].highlighted);
    Ok(())
}

#[test]
fn test_boids_stay_inside_world() -> Result<()> {
    let frames = run_to_frames(small_config(), 3, 300)?;
    for frame in &frames {
        let detail = frame.detail.expect("highlighted boid");
        assert!((0.0..=640.0).contains(&detail.position.x));
        assert!((0.0..=400.0).contains(&detail.position.y));
    }
    Ok(())
}

#[test]
fn test_same_seed_same_output() -> Result<()> {
    let first = run_to_frames(small_config(), 2024, 200)?;
    let second = run_to_frames(small_config(), 2024, 200)?;
    assert_eq!(first, second);

    let other = run_to_frames(small_config(), 2025, 200)?;
    assert_ne!(first, other);
    Ok(())
}

#[test]
fn test_snapshot_order_changes_trajectories() -> Result<()> {
    let config = SimulationConfig {
        update_order: UpdateOrder::Snapshot,
        ..small_config()
    };
    let sequential = run_to_frames(small_config(), 8, 60)?;
    let snapshot = run_to_frames(config, 8, 60)?;
    assert_eq!(snapshot.len(), sequential.len());

    // same seed and scenario, so only the neighbor reads differ
    let outlines = |frames: &[Frame]| -> Vec<[Point; 4]> {
        frames
            .iter()
            .flat_map(|frame| frame.boids.iter().map(|sprite| sprite.outline))
            .collect()
    };
    assert_eq!(snapshot[0].boids.len(), sequential[0].boids.len());
    assert_ne!(outlines(&snapshot), outlines(&sequential));
    assert_eq!(snapshot, run_to_frames(config, 8, 60)?);
    Ok(())
}

#[test]
fn test_quit_event_stops_run() -> Result<()> {
    let scenario = Scenario::from_json(r#"{"events": [{"tick": 30, "quit": true}]}"#)?;
    let (outcome, _) =
        run_headless(small_config(), 1, options(500), scenario, None::<Vec<u8>>)?;

    assert_eq!(outcome.stats.ticks, 29);
    assert_eq!(outcome.report.frames_presented, 29);
    assert_eq!(outcome.report.frames_written, 0);
    assert_eq!(outcome.boid_count, 20);
    Ok(())
}

#[test]
fn test_config_and_scenario_files() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("config.json");
    fs::write(
        &config_path,
        r#"{"initial_boids": 7, "weights": {"alignment": 5.0}, "update_order": "snapshot"}"#,
    )?;
    let scenario_path = dir.path().join("scenario.json");
    fs::write(&scenario_path, SCRIPT)?;

    let config = load_config(&config_path)?;
    assert_eq!(config.initial_boids, 7);
    assert_eq!(config.weights.alignment, 5.0);
    assert_eq!(config.weights.avoidance, 7.0);
    assert_eq!(config.update_order, UpdateOrder::Snapshot);

    let scenario = Scenario::load(&scenario_path)?;
    assert_eq!(scenario.events.len(), 5);

    assert!(load_config(&dir.path().join("missing.json")).is_err());
    Ok(())
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = SimulationConfig {
        local_range: 0.0,
        ..small_config()
    };
    let result = run_headless(config, 1, options(10), Scenario::default(), None::<Vec<u8>>);
    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("local_range"));
}
