#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// A 2D position in world coordinates
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Display colour. The core never interprets it, only carries it to the adapter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const WHITE: Colour = Colour::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Request to add a boid at `position`.
///
/// `heading` is in degrees; when absent the simulation picks one at random.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpawnBoid {
    pub position: Point,
    #[serde(default)]
    pub heading: Option<f32>,
}

/// Everything the adapter reports to the core once per tick
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TickInput {
    /// Time since the previous tick, in milliseconds
    pub elapsed: f32,
    /// Pointer position in world coordinates
    pub pointer: Point,
    pub spawn_boid: Option<SpawnBoid>,
    pub spawn_obstacle: Option<Point>,
    pub cycle_highlight: bool,
    pub quit: bool,
}

impl TickInput {
    /// Input with only elapsed time and pointer set
    pub fn idle(elapsed: f32, pointer: Point) -> Self {
        Self {
            elapsed,
            pointer,
            ..Self::default()
        }
    }
}

/// Outline and heading marker for one boid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoidSprite {
    /// Head, first wing tip, tail middle, second wing tip
    pub outline: [Point; 4],
    /// From the head to a point two radii ahead of the centre
    pub heading_line: (Point, Point),
    pub colour: Colour,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ObstacleSprite {
    pub centre: Point,
    pub radius: f32,
}

/// Extra information drawn for the highlighted boid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoidDetail {
    pub index: usize,
    pub position: Point,
    /// Radians
    pub heading: f32,
    pub sensing_ring_radius: f32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FrameSummary {
    pub tick: u64,
    pub boid_count: usize,
    pub obstacle_count: usize,
    pub target_tick_rate: u32,
}

/// Draw descriptors produced by the core after each tick
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Frame {
    pub boids: Vec<BoidSprite>,
    pub obstacles: Vec<ObstacleSprite>,
    pub detail: Option<BoidDetail>,
    pub summary: FrameSummary,
}

impl Frame {
    /// Serialize as a single line of JSON
    #[cfg(feature = "std")]
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_input_defaults_from_partial_json() {
        let input: TickInput =
            serde_json::from_str(r#"{"elapsed": 16.0, "cycle_highlight": true}"#).unwrap();
        assert_eq!(input.elapsed, 16.0);
        assert!(input.cycle_highlight);
        assert!(!input.quit);
        assert_eq!(input.pointer, Point::default());
        assert!(input.spawn_boid.is_none());
    }

    #[test]
    fn test_spawn_boid_heading_is_optional() {
        let spawn: SpawnBoid =
            serde_json::from_str(r#"{"position": {"x": 4.0, "y": 2.0}}"#).unwrap();
        assert_eq!(spawn.position, Point::new(4.0, 2.0));
        assert_eq!(spawn.heading, None);
    }

    #[test]
    fn test_frame_json_line() {
        let sprite = |highlighted| BoidSprite {
            outline: [Point::default(); 4],
            heading_line: (Point::default(), Point::new(1.0, 0.0)),
            colour: Colour::WHITE,
            highlighted,
        };
        let frame = Frame {
            boids: vec![sprite(false), sprite(true)],
            ..Frame::default()
        };
        let line = frame.to_json_line().unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains("\"highlighted\":true"));
    }
}
