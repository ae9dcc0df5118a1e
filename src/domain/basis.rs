//! Basic building blocks.

use std::ops::{Add, Neg, Sub};

use nalgebra::Vector2;

/// Absolute part of the floating tolerance.
pub const ABSOLUTE_TOLERANCE: f64 = 1e-8;
/// Relative part of the floating tolerance, scaled by the reference value.
pub const RELATIVE_TOLERANCE: f64 = 1e-5;

/// Returns true if `value` equals `reference` within the combined absolute and relative
/// tolerance. The tolerance is asymmetric: only `reference` scales it.
pub fn is_close(value: f64, reference: f64) -> bool {
    (value - reference).abs() <= ABSOLUTE_TOLERANCE + RELATIVE_TOLERANCE * reference.abs()
}

/// Returns true if `distance` is below `threshold` or within tolerance of it.
pub fn is_within(distance: f64, threshold: f64) -> bool {
    distance < threshold || is_close(distance, threshold)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position(Vector2<f64>);

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self(Vector2::new(x, y))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn distance(&self, position: Self) -> f64 {
        (self.0 - position.0).norm()
    }

    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    pub fn dot(&self, other: Self) -> f64 {
        self.0.dot(&other.0)
    }

    /// z component of the 3D cross product of the two vectors.
    pub fn cross(&self, other: Self) -> f64 {
        self.0.perp(&other.0)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<Position> for (f32, f32) {
    fn from(value: Position) -> Self {
        (value.x() as f32, value.y() as f32)
    }
}

impl From<Position> for (f64, f64) {
    fn from(value: Position) -> Self {
        (value.x(), value.y())
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Position {
    type Output = Position;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}
