use flock_shared::ObstacleSprite;

use crate::vector::Vector2;

/// A static circular obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub position: Vector2,
    pub radius: f32,
}

impl Obstacle {
    pub fn new(radius: f32, position: Vector2) -> Self {
        Self { position, radius }
    }

    /// Whether a boid at `from` should steer around this obstacle
    pub fn is_within(&self, from: &Vector2, avoid_distance: f32) -> bool {
        self.position.distance(from) <= avoid_distance + self.radius
    }

    pub fn sprite(&self) -> ObstacleSprite {
        ObstacleSprite {
            centre: self.position.into(),
            radius: self.radius,
        }
    }
}

/// The obstacle that follows the adapter's pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerObstacle {
    obstacle: Obstacle,
}

impl PointerObstacle {
    pub fn new(radius: f32) -> Self {
        Self {
            obstacle: Obstacle::new(radius, Vector2::zero()),
        }
    }

    pub fn move_to(&mut self, position: Vector2) {
        self.obstacle.position = position;
    }

    pub fn position(&self) -> Vector2 {
        self.obstacle.position
    }

    pub fn as_obstacle(&self) -> &Obstacle {
        &self.obstacle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_range_includes_radius() {
        let obstacle = Obstacle::new(15.0, Vector2::new(100.0, 100.0));
        assert!(obstacle.is_within(&Vector2::new(145.0, 100.0), 30.0));
        assert!(!obstacle.is_within(&Vector2::new(145.1, 100.0), 30.0));
    }

    #[test]
    fn test_pointer_follows_input() {
        let mut pointer = PointerObstacle::new(20.0);
        assert_eq!(pointer.position(), Vector2::zero());

        pointer.move_to(Vector2::new(12.0, 34.0));
        assert_eq!(pointer.position(), Vector2::new(12.0, 34.0));
        assert_eq!(pointer.as_obstacle().radius, 20.0);
    }
}
