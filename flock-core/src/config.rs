use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Weights used when combining the steering vectors of a boid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringWeights {
    pub noise: f32,
    pub separation: f32,
    pub alignment: f32,
    pub cohesion: f32,
    pub avoidance: f32,
    /// The weighted sum is divided by this
    pub divisor: f32,
    /// Fraction of the heading error corrected per tick; smaller means more inertia
    pub turn_rate: f32,
}

impl Default for SteeringWeights {
    fn default() -> Self {
        Self {
            noise: 0.5,
            separation: 2.0,
            alignment: 3.0,
            cohesion: 0.4,
            avoidance: 7.0,
            divisor: 15.0,
            turn_rate: 0.1,
        }
    }
}

/// How neighbor positions are read while the flock is being updated
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOrder {
    /// Boids move in place in list order. Later boids see neighbors that
    /// already moved this tick, and a pair's range result is whatever was
    /// computed the first time the pair was queried.
    #[default]
    Sequential,
    /// Every query reads the positions and headings from before the tick.
    Snapshot,
}

/// Startup configuration for a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of boids seeded at startup
    pub initial_boids: usize,
    /// Boid size in world units; the drawn radius is half of this
    pub boid_size: f32,
    /// World units per millisecond
    pub boid_max_speed: f32,
    /// Radius within which another boid counts as a neighbor
    pub local_range: f32,
    /// Neighbors closer than this push the boid away
    pub boid_avoid_distance: f32,
    /// Added to an obstacle's radius to decide whether a boid avoids it
    pub obstacle_avoid_distance: f32,
    pub pointer_radius: f32,
    pub spawned_obstacle_radius: f32,
    pub weights: SteeringWeights,
    pub target_tick_rate: u32,
    pub world_width: f32,
    pub world_height: f32,
    pub update_order: UpdateOrder,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_boids: 50,
            boid_size: 10.0,
            boid_max_speed: 0.2,
            local_range: 100.0,
            boid_avoid_distance: 20.0,
            obstacle_avoid_distance: 30.0,
            pointer_radius: 20.0,
            spawned_obstacle_radius: 15.0,
            weights: SteeringWeights::default(),
            target_tick_rate: 60,
            world_width: 1280.0,
            world_height: 720.0,
            update_order: UpdateOrder::default(),
        }
    }
}

/// Errors raised when validating a configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("target_tick_rate must be non-zero")]
    ZeroTickRate,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("boid_size", self.boid_size),
            ("boid_max_speed", self.boid_max_speed),
            ("local_range", self.local_range),
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("weights.divisor", self.weights.divisor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let finite = [
            ("boid_avoid_distance", self.boid_avoid_distance),
            ("obstacle_avoid_distance", self.obstacle_avoid_distance),
            ("pointer_radius", self.pointer_radius),
            ("spawned_obstacle_radius", self.spawned_obstacle_radius),
            ("weights.noise", self.weights.noise),
            ("weights.separation", self.weights.separation),
            ("weights.alignment", self.weights.alignment),
            ("weights.cohesion", self.weights.cohesion),
            ("weights.avoidance", self.weights.avoidance),
            ("weights.turn_rate", self.weights.turn_rate),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        if self.target_tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(())
    }

    pub fn with_world_size(mut self, width: f32, height: f32) -> Self {
        self.world_width = width;
        self.world_height = height;
        self
    }
}
