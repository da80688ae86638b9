use core::f32::consts::{PI, TAU};

use flock_shared::{BoidSprite, Colour};
use rand::Rng;

use crate::config::SteeringWeights;
use crate::math::{self, degrees_to_radians, wrap_angle};
use crate::vector::Vector2;

/// Distance used in place of zero when two boids share a position
pub const COINCIDENT_DISTANCE: f32 = 0.01;

const ALIGNMENT_STRENGTH: f32 = 100.0;
const COHESION_SCALE: f32 = 0.3;
const NOISE_TURN_DEGREES: i32 = 5;
const NOISE_SPEED_STEPS: u32 = 10;

/// What a boid can see of another flock member
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: Vector2,
    pub heading: f32,
}

/// Capabilities the engine needs from anything that flocks
pub trait FlockMember {
    fn position(&self) -> Vector2;

    /// Heading in radians
    fn heading(&self) -> f32;

    fn set_position(&mut self, position: Vector2);

    /// Steer and move for one tick
    fn update<R: Rng + ?Sized>(
        &mut self,
        delta_time: f32,
        neighbors: &[Neighbor],
        obstacles: &[Vector2],
        weights: &SteeringWeights,
        rng: &mut R,
    );

    fn as_neighbor(&self) -> Neighbor {
        Neighbor {
            position: self.position(),
            heading: self.heading(),
        }
    }
}

/// Separation, alignment and cohesion for one boid, each of unit or zero length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockingVectors {
    pub separation: Vector2,
    pub alignment: Vector2,
    pub cohesion: Vector2,
}

/// Signed rotation from `from` to `to` that goes the short way around.
///
/// Both angles are expected in (-π, π], which keeps the result within [-π, π].
pub fn shortest_rotation(from: f32, to: f32) -> f32 {
    let delta = to - from;
    if delta == 0.0 {
        return 0.0;
    }
    let alternate = if delta > 0.0 { delta - TAU } else { delta + TAU };
    if math::abs(delta) <= math::abs(alternate) {
        delta
    } else {
        alternate
    }
}

/// A single flocking boid
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vector2,
    /// Radians, kept in (-π, π]
    pub heading: f32,
    pub max_speed: f32,
    pub radius: f32,
    pub avoid_distance: f32,
    pub colour: Colour,
}

impl Boid {
    pub fn new(
        size: f32,
        max_speed: f32,
        position: Vector2,
        heading_degrees: f32,
        avoid_distance: f32,
    ) -> Self {
        Self {
            position,
            heading: wrap_angle(degrees_to_radians(heading_degrees)),
            max_speed,
            radius: size / 2.0,
            avoid_distance,
            colour: Colour::WHITE,
        }
    }

    pub fn with_colour(mut self, colour: Colour) -> Self {
        self.colour = colour;
        self
    }

    /// Wander vector: a few degrees off the current heading at a random speed
    pub fn noise_vector<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2 {
        let offset = rng.gen_range(-NOISE_TURN_DEGREES..=NOISE_TURN_DEGREES) as f32;
        let speed = rng.gen_range(1..=NOISE_SPEED_STEPS) as f32 / NOISE_SPEED_STEPS as f32;
        Vector2::from_polar(self.heading + degrees_to_radians(offset), speed)
    }

    /// Cohesion steers towards the neighbors' centroid; every vector is zero
    /// when there are no neighbors.
    pub fn flocking_vectors(&self, neighbors: &[Neighbor]) -> FlockingVectors {
        let mut separation = Vector2::zero();
        let mut alignment = Vector2::zero();
        let mut centre_of_mass = Vector2::zero();

        for neighbor in neighbors {
            let mut distance = neighbor.position.distance(&self.position);
            if distance == 0.0 {
                distance = COINCIDENT_DISTANCE;
            }
            if distance <= self.avoid_distance {
                separation += (self.position - neighbor.position).reciprocal(1.0);
            }
            alignment += Vector2::from_polar(neighbor.heading, ALIGNMENT_STRENGTH / distance);
            centre_of_mass += neighbor.position;
        }

        let cohesion = if neighbors.is_empty() {
            Vector2::zero()
        } else {
            let centroid = centre_of_mass.scale(1.0 / neighbors.len() as f32);
            ((centroid - self.position) * COHESION_SCALE).unit()
        };

        FlockingVectors {
            separation: separation.unit(),
            alignment: alignment.unit(),
            cohesion,
        }
    }

    /// Unit vector pointing away from nearby obstacles, zero when there are none
    pub fn avoidance_vector(&self, obstacles: &[Vector2]) -> Vector2 {
        obstacles
            .iter()
            .map(|obstacle| (self.position - *obstacle).reciprocal(1.0))
            .sum::<Vector2>()
            .unit()
    }

    /// Combine the steering vectors into the movement this boid wants.
    ///
    /// A boid with no neighbors follows its noise vector alone.
    pub fn desired_vector(
        &self,
        noise: Vector2,
        neighbors: &[Neighbor],
        obstacles: &[Vector2],
        weights: &SteeringWeights,
    ) -> Vector2 {
        if neighbors.is_empty() {
            return noise;
        }

        let flocking = self.flocking_vectors(neighbors);
        let avoidance = self.avoidance_vector(obstacles);

        (noise * weights.noise
            + flocking.separation * weights.separation
            + flocking.alignment * weights.alignment
            + flocking.cohesion * weights.cohesion
            + avoidance * weights.avoidance)
            .scale(1.0 / weights.divisor)
    }

    /// Rotate part of the way towards `desired`; returns the full rotation chosen
    pub fn turn_towards(&mut self, desired: &Vector2, turn_rate: f32) -> f32 {
        let rotation = shortest_rotation(self.heading, desired.heading());
        self.heading = wrap_angle(self.heading + rotation * turn_rate);
        rotation
    }

    /// Move forward along the current heading
    fn advance(&mut self, speed: f32, delta_time: f32) {
        let speed = speed.min(self.max_speed);
        self.position += Vector2::from_polar(self.heading, speed * delta_time);
    }

    fn draw_point(&self, angle: f32, scale: f32) -> Vector2 {
        self.position + Vector2::from_polar(angle, self.radius * scale)
    }

    /// Head, wing tip, tail middle, wing tip
    pub fn draw_points(&self) -> [Vector2; 4] {
        let wing = 5.0 * PI / 6.0;
        [
            self.draw_point(self.heading, 1.0),
            self.draw_point(self.heading + wing, 1.0),
            self.draw_point(self.heading + PI, 0.5),
            self.draw_point(self.heading - wing, 1.0),
        ]
    }

    /// Point two radii ahead of the boid
    pub fn heading_line(&self) -> Vector2 {
        self.draw_point(self.heading, 2.0)
    }

    pub fn sprite(&self, highlighted: bool) -> BoidSprite {
        let points = self.draw_points();
        BoidSprite {
            outline: points.map(Into::into),
            heading_line: (points[0].into(), self.heading_line().into()),
            colour: self.colour,
            highlighted,
        }
    }
}

impl FlockMember for Boid {
    fn position(&self) -> Vector2 {
        self.position
    }

    fn heading(&self) -> f32 {
        self.heading
    }

    fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    fn update<R: Rng + ?Sized>(
        &mut self,
        delta_time: f32,
        neighbors: &[Neighbor],
        obstacles: &[Vector2],
        weights: &SteeringWeights,
        rng: &mut R,
    ) {
        let noise = self.noise_vector(rng);
        let desired = self.desired_vector(noise, neighbors, obstacles, weights);
        self.turn_towards(&desired, weights.turn_rate);
        self.advance(desired.magnitude(), delta_time);
    }
}
