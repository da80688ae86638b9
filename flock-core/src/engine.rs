use alloc::vec::Vec;

use flock_shared::{BoidDetail, Frame, FrameSummary, Point, TickInput};
use rand::rngs::SmallRng;
use rand::Rng;
use thiserror::Error;

use crate::adapter::DisplayAdapter;
use crate::boid::{Boid, FlockMember, Neighbor};
use crate::config::{ConfigError, SimulationConfig, UpdateOrder};
use crate::neighbors::{local_neighbors, local_obstacles, NeighborCache};
use crate::obstacle::{Obstacle, PointerObstacle};
use crate::vector::{Vector2, VectorError};

/// Teleport a position that left the world to the opposite edge
pub fn wrap_position(position: Vector2, width: f32, height: f32) -> Vector2 {
    let wrap = |value: f32, extent: f32| {
        if value < 0.0 {
            extent
        } else if value > extent {
            0.0
        } else {
            value
        }
    };
    Vector2::new(wrap(position.i, width), wrap(position.j, height))
}

/// Errors raised while building or driving a simulation
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid position: {0}")]
    Position(#[from] VectorError),
    #[error("elapsed time must be a finite, non-negative number of milliseconds, got {0}")]
    InvalidElapsed(f32),
}

/// Bookkeeping from the most recent tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Pair distances measured this tick
    pub pairs_evaluated: usize,
    /// Sum of every boid's neighbor count
    pub neighbor_links: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub ticks: u64,
}

/// State that exists for one pass over the flock and is dropped afterwards
struct TickScope {
    cache: NeighborCache,
    snapshot: Option<Vec<Neighbor>>,
    neighbor_links: usize,
}

impl TickScope {
    fn open(boids: &[Boid], order: UpdateOrder) -> Self {
        let snapshot = match order {
            UpdateOrder::Sequential => None,
            UpdateOrder::Snapshot => Some(boids.iter().map(|boid| boid.as_neighbor()).collect()),
        };
        Self {
            cache: NeighborCache::new(boids.len()),
            snapshot,
            neighbor_links: 0,
        }
    }

    fn neighbors_of(&mut self, boids: &[Boid], index: usize, local_range: f32) -> Vec<Neighbor> {
        let count = boids.len();
        let neighbors = match &self.snapshot {
            Some(snapshot) => {
                local_neighbors(index, count, local_range, &mut self.cache, |k| snapshot[k])
            }
            None => local_neighbors(index, count, local_range, &mut self.cache, |k| {
                boids[k].as_neighbor()
            }),
        };
        self.neighbor_links += neighbors.len();
        neighbors
    }

    fn close(self) -> TickStats {
        TickStats {
            pairs_evaluated: self.cache.evaluations(),
            neighbor_links: self.neighbor_links,
        }
    }
}

/// Owns the flock and obstacles and advances them one tick at a time
pub struct Simulation<R = SmallRng> {
    boids: Vec<Boid>,
    obstacles: Vec<Obstacle>,
    pointer: PointerObstacle,
    highlighted: usize,
    running: bool,
    ticks: u64,
    last_stats: TickStats,
    config: SimulationConfig,
    rng: R,
}

impl<R: Rng> Simulation<R> {
    /// An empty world
    pub fn new(config: SimulationConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            boids: Vec::with_capacity(config.initial_boids),
            obstacles: Vec::new(),
            pointer: PointerObstacle::new(config.pointer_radius),
            highlighted: 0,
            running: true,
            ticks: 0,
            last_stats: TickStats::default(),
            config,
            rng,
        })
    }

    /// A world with `initial_boids` boids placed by `random_position`
    pub fn seeded<F>(
        config: SimulationConfig,
        rng: R,
        mut random_position: F,
    ) -> Result<Self, SimulationError>
    where
        F: FnMut() -> Point,
    {
        let mut simulation = Self::new(config, rng)?;
        for _ in 0..config.initial_boids {
            let heading = simulation.rng.gen_range(0..360) as f32;
            simulation.spawn_boid(
                config.boid_size,
                config.boid_max_speed,
                Vector2::try_from(random_position())?,
                heading,
            );
        }
        log::info!(
            "Seeded {} boids in a {}x{} world",
            simulation.boids.len(),
            config.world_width,
            config.world_height
        );
        Ok(simulation)
    }

    /// Seed a world sized and populated by `adapter`
    pub fn from_adapter<A: DisplayAdapter>(
        config: SimulationConfig,
        rng: R,
        adapter: &mut A,
    ) -> Result<Self, SimulationError> {
        let (width, height) = adapter.world_size();
        Self::seeded(config.with_world_size(width, height), rng, || {
            adapter.random_position()
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn pointer(&self) -> &PointerObstacle {
        &self.pointer
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn last_stats(&self) -> TickStats {
        self.last_stats
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn spawn_boid(
        &mut self,
        size: f32,
        max_speed: f32,
        position: Vector2,
        heading_degrees: f32,
    ) {
        self.boids.push(Boid::new(
            size,
            max_speed,
            position,
            heading_degrees,
            self.config.boid_avoid_distance,
        ));
        log::debug!("Added boid #{} at {:?}", self.boids.len() - 1, position);
    }

    pub fn spawn_obstacle(&mut self, radius: f32, position: Vector2) {
        self.obstacles.push(Obstacle::new(radius, position));
        log::debug!("Placed obstacle #{} at {:?}", self.obstacles.len() - 1, position);
    }

    /// Move the highlight to the next boid, wrapping to the first
    pub fn cycle_highlighted(&mut self) {
        self.highlighted += 1;
        if self.highlighted >= self.boids.len() {
            self.highlighted = 0;
        }
        log::debug!("Highlighting boid #{}", self.highlighted);
    }

    /// Pointer refresh and spawn/highlight requests.
    ///
    /// Every position is checked before anything changes, so rejected input
    /// leaves the world as it was.
    pub fn apply_input(&mut self, input: &TickInput) -> Result<(), SimulationError> {
        let pointer = Vector2::try_from(input.pointer)?;
        let obstacle = input.spawn_obstacle.map(Vector2::try_from).transpose()?;
        let boid = input
            .spawn_boid
            .map(|request| Vector2::try_from(request.position).map(|at| (at, request.heading)))
            .transpose()?;

        self.pointer.move_to(pointer);
        if let Some(position) = obstacle {
            self.spawn_obstacle(self.config.spawned_obstacle_radius, position);
        }
        if let Some((position, heading)) = boid {
            let heading = match heading {
                Some(heading) => heading,
                None => self.rng.gen_range(0..360) as f32,
            };
            self.spawn_boid(
                self.config.boid_size,
                self.config.boid_max_speed,
                position,
                heading,
            );
        }
        if input.cycle_highlight {
            self.cycle_highlighted();
        }
        Ok(())
    }

    /// Update every boid once, in list order, and wrap it back into the world
    pub fn step(&mut self, delta_time: f32) -> TickStats {
        let weights = self.config.weights;
        let local_range = self.config.local_range;
        let avoid_distance = self.config.obstacle_avoid_distance;
        let (width, height) = (self.config.world_width, self.config.world_height);

        let mut scope = TickScope::open(&self.boids, self.config.update_order);
        for index in 0..self.boids.len() {
            let neighbors = scope.neighbors_of(&self.boids, index, local_range);
            let obstacles = local_obstacles(
                &self.boids[index].position(),
                &self.obstacles,
                self.pointer.as_obstacle(),
                avoid_distance,
            );

            let boid = &mut self.boids[index];
            boid.update(delta_time, &neighbors, &obstacles, &weights, &mut self.rng);
            boid.set_position(wrap_position(boid.position(), width, height));
        }
        let stats = scope.close();

        self.ticks += 1;
        self.last_stats = stats;
        log::trace!(
            "tick {}: {} pairs measured, {} neighbor links",
            self.ticks,
            stats.pairs_evaluated,
            stats.neighbor_links
        );
        stats
    }

    /// Process one tick of input and return what to draw
    pub fn tick(&mut self, input: &TickInput) -> Result<Frame, SimulationError> {
        if !(input.elapsed.is_finite() && input.elapsed >= 0.0) {
            return Err(SimulationError::InvalidElapsed(input.elapsed));
        }
        self.apply_input(input)?;
        self.step(input.elapsed);
        Ok(self.frame())
    }

    pub fn frame(&self) -> Frame {
        let boids = self
            .boids
            .iter()
            .enumerate()
            .map(|(index, boid)| boid.sprite(index == self.highlighted))
            .collect();
        let obstacles = self.obstacles.iter().map(Obstacle::sprite).collect();
        let detail = self.boids.get(self.highlighted).map(|boid| BoidDetail {
            index: self.highlighted,
            position: boid.position.into(),
            heading: boid.heading,
            sensing_ring_radius: self.config.local_range / 2.0,
        });

        Frame {
            boids,
            obstacles,
            detail,
            summary: FrameSummary {
                tick: self.ticks,
                boid_count: self.boids.len(),
                obstacle_count: self.obstacles.len(),
                target_tick_rate: self.config.target_tick_rate,
            },
        }
    }

    /// Tick until the adapter asks to quit or sends input that cannot be applied
    pub fn run<A: DisplayAdapter>(
        &mut self,
        adapter: &mut A,
    ) -> Result<RunStats, SimulationError> {
        let start = self.ticks;
        while self.running {
            let input = adapter.poll_input();
            if input.quit {
                self.stop();
                continue;
            }
            let frame = match self.tick(&input) {
                Ok(frame) => frame,
                Err(err) => {
                    log::error!("Rejected input on tick {}: {}", self.ticks + 1, err);
                    self.stop();
                    return Err(err);
                }
            };
            adapter.present(&frame);
        }
        let stats = RunStats {
            ticks: self.ticks - start,
        };
        log::info!(
            "Simulation stopped after {} ticks with {} boids and {} obstacles",
            stats.ticks,
            self.boids.len(),
            self.obstacles.len()
        );
        Ok(stats)
    }
}
