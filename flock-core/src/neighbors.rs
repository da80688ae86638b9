use alloc::vec;
use alloc::vec::Vec;

use crate::boid::Neighbor;
use crate::obstacle::Obstacle;
use crate::vector::Vector2;

/// Memo of pairwise "within local range" results for a single tick.
///
/// Pairs are unordered, so the answer computed while gathering neighbors for
/// one boid is reused for the other. Build a fresh cache every tick.
#[derive(Debug, Clone)]
pub struct NeighborCache {
    in_range: Vec<Option<bool>>,
    evaluations: usize,
}

impl NeighborCache {
    pub fn new(boid_count: usize) -> Self {
        let pairs = boid_count * boid_count.saturating_sub(1) / 2;
        Self {
            in_range: vec![None; pairs],
            evaluations: 0,
        }
    }

    /// Number of pair results actually computed
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    fn slot(a: usize, b: usize) -> usize {
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        high * (high - 1) / 2 + low
    }

    pub fn get(&self, a: usize, b: usize) -> Option<bool> {
        debug_assert!(a != b, "a boid is never its own neighbor");
        self.in_range.get(Self::slot(a, b)).copied().flatten()
    }

    /// Cached result for the pair, computing and storing it on first use
    pub fn get_or_insert_with<F>(&mut self, a: usize, b: usize, in_range: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        debug_assert!(a != b, "a boid is never its own neighbor");
        let slot = Self::slot(a, b);
        match self.in_range[slot] {
            Some(cached) => cached,
            None => {
                let computed = in_range();
                self.in_range[slot] = Some(computed);
                self.evaluations += 1;
                computed
            }
        }
    }
}

/// Neighbors of boid `index` among `count` boids, read through `view`
pub fn local_neighbors<F>(
    index: usize,
    count: usize,
    local_range: f32,
    cache: &mut NeighborCache,
    view: F,
) -> Vec<Neighbor>
where
    F: Fn(usize) -> Neighbor,
{
    let own = view(index);
    let mut neighbors = Vec::new();
    for other in (0..count).filter(|&other| other != index) {
        let candidate = view(other);
        let in_range = cache.get_or_insert_with(index, other, || {
            candidate.position.distance(&own.position) < local_range
        });
        if in_range {
            neighbors.push(candidate);
        }
    }
    neighbors
}

/// Positions of the obstacles a boid at `position` should steer around
pub fn local_obstacles(
    position: &Vector2,
    obstacles: &[Obstacle],
    pointer: &Obstacle,
    avoid_distance: f32,
) -> Vec<Vector2> {
    obstacles
        .iter()
        .chain(core::iter::once(pointer))
        .filter(|obstacle| obstacle.is_within(position, avoid_distance))
        .map(|obstacle| obstacle.position)
        .collect()
}
