#![cfg_attr(not(feature = "std"), no_std)]

//! Flocking boids: steering, neighbor bookkeeping and the tick loop.
//!
//! Drawing, input and frame pacing are left to a [`DisplayAdapter`].

extern crate alloc;

pub mod adapter;
pub mod boid;
pub mod config;
pub mod engine;
pub mod math;
pub mod neighbors;
pub mod obstacle;
pub mod rng;
pub mod vector;

pub use adapter::DisplayAdapter;
pub use boid::{shortest_rotation, Boid, FlockMember, FlockingVectors, Neighbor};
pub use config::{ConfigError, SimulationConfig, SteeringWeights, UpdateOrder};
pub use engine::{wrap_position, RunStats, Simulation, SimulationError, TickStats};
pub use neighbors::NeighborCache;
pub use obstacle::{Obstacle, PointerObstacle};
pub use rng::seeded_rng;
pub use vector::{Vector2, VectorError};

pub use flock_shared as shared;
