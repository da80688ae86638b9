use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use flock_shared::{Point, SpawnBoid, TickInput};
use serde::{Deserialize, Serialize};

/// Input scripted for a single tick
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScenarioEvent {
    /// 1-based tick the event fires on
    pub tick: u64,
    pub pointer: Option<Point>,
    pub spawn_boid: Option<SpawnBoid>,
    pub spawn_obstacle: Option<Point>,
    pub cycle_highlight: bool,
    pub quit: bool,
}

impl ScenarioEvent {
    /// Fold this event into the input being built for its tick
    pub fn apply(&self, input: &mut TickInput) {
        if let Some(pointer) = self.pointer {
            input.pointer = pointer;
        }
        if self.spawn_boid.is_some() {
            input.spawn_boid = self.spawn_boid;
        }
        if self.spawn_obstacle.is_some() {
            input.spawn_obstacle = self.spawn_obstacle;
        }
        input.cycle_highlight |= self.cycle_highlight;
        input.quit |= self.quit;
    }
}

/// A scripted sequence of inputs, ordered by tick
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub events: Vec<ScenarioEvent>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut scenario: Scenario =
            serde_json::from_str(json).context("Scenario is not valid JSON")?;
        scenario.events.sort_by_key(|event| event.tick);
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Events scheduled for `tick`
    pub fn events_at(&self, tick: u64) -> impl Iterator<Item = &ScenarioEvent> {
        let start = self.events.partition_point(|event| event.tick < tick);
        self.events[start..]
            .iter()
            .take_while(move |event| event.tick == tick)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
