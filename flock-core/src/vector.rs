use core::f32::consts::PI;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Neg, Sub};

use flock_shared::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math;

/// Contract violations when building or dividing vectors
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum VectorError {
    #[error("vector component {0} is not a finite number")]
    InvalidVectorComponent(f32),
    #[error("cannot divide vector by 0")]
    DivisionByZero,
}

/// An immutable 2D vector used for positions, headings and steering
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub i: f32,
    pub j: f32,
}

impl Vector2 {
    pub const fn new(i: f32, j: f32) -> Self {
        Self { i, j }
    }

    /// Build a vector, rejecting NaN and infinite components
    pub fn try_new(i: f32, j: f32) -> Result<Self, VectorError> {
        for component in [i, j] {
            if !component.is_finite() {
                return Err(VectorError::InvalidVectorComponent(component));
            }
        }
        Ok(Self { i, j })
    }

    pub const fn zero() -> Self {
        Self { i: 0.0, j: 0.0 }
    }

    pub fn from_polar(angle: f32, magnitude: f32) -> Self {
        let (sin, cos) = math::sin_cos(angle);
        Self {
            i: cos * magnitude,
            j: sin * magnitude,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.i == 0.0 && self.j == 0.0
    }

    pub fn scale(&self, scalar: f32) -> Self {
        Self {
            i: self.i * scalar,
            j: self.j * scalar,
        }
    }

    pub fn dot(&self, other: &Vector2) -> f32 {
        self.i * other.i + self.j * other.j
    }

    pub fn magnitude(&self) -> f32 {
        math::sqrt(self.i * self.i + self.j * self.j)
    }

    /// Unit-circle heading in radians, in (-π, π]
    pub fn heading(&self) -> f32 {
        let heading = math::atan2(self.j, self.i);
        // atan2 gives -π for a negative-zero j
        if heading == -PI {
            PI
        } else {
            heading
        }
    }

    /// Unit vector in the same direction; the zero vector maps to itself
    pub fn unit(&self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            *self
        } else {
            self.scale(1.0 / mag)
        }
    }

    /// Clamp the magnitude to `max` without changing direction
    pub fn limit(&self, max: f32) -> Self {
        if self.magnitude() < max {
            *self
        } else {
            self.unit().scale(max)
        }
    }

    pub fn checked_div(&self, scalar: f32) -> Result<Self, VectorError> {
        if scalar == 0.0 {
            return Err(VectorError::DivisionByZero);
        }
        Ok(self.scale(1.0 / scalar))
    }

    /// Component-wise `numerator / component`, with zero components left at zero.
    ///
    /// Applied to `self - other` this gives a push away from `other` that grows
    /// as the two get closer.
    pub fn reciprocal(&self, numerator: f32) -> Self {
        let invert = |component: f32| {
            if component == 0.0 {
                0.0
            } else {
                numerator / component
            }
        };
        Self {
            i: invert(self.i),
            j: invert(self.j),
        }
    }

    pub fn distance(&self, other: &Vector2) -> f32 {
        (*self - *other).magnitude()
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            i: self.i + other.i,
            j: self.j + other.j,
        }
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            i: self.i - other.i,
            j: self.j - other.j,
        }
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        self.scale(scalar)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            i: -self.i,
            j: -self.j,
        }
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, other: Self) {
        self.i += other.i;
        self.j += other.j;
    }
}

impl Sum for Vector2 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl TryFrom<Point> for Vector2 {
    type Error = VectorError;

    fn try_from(point: Point) -> Result<Self, Self::Error> {
        Self::try_new(point.x, point.y)
    }
}

impl From<Vector2> for Point {
    fn from(vector: Vector2) -> Self {
        Point::new(vector.i, vector.j)
    }
}
