//! Collision detection between the agent and the static world.
//!
//! Every check inflates the agent by a buffer of `radius + granularity / √2`. The extra
//! `granularity / √2` is half the diagonal of a grid cell, so a placement that is free on the grid
//! is free everywhere within the cell around it. Distances equal to a threshold (within
//! [`is_close`](super::is_close) tolerance) count as contact.

use std::f64::consts::SQRT_2;

use super::{is_close, is_within, Goal, Position, Window};

pub trait HasCollision {
    fn shape(&self) -> Shape;
}

/// Collision buffer of a body with the given radius on a grid with the given granularity.
pub fn buffer(radius: f64, granularity: f64) -> f64 {
    radius + granularity / SQRT_2
}

/// Returns true if the object touches any of the walls.
pub fn touches_wall(object: &dyn HasCollision, walls: &[Segment], granularity: f64) -> bool {
    let shape = object.shape();
    let buffer = buffer(shape.radius(), granularity);
    walls.iter().any(|wall| shape.touches_segment(wall, buffer))
}

/// Returns true if the object touches any of the goals.
pub fn touches_goal(object: &dyn HasCollision, goals: &[Goal]) -> bool {
    let shape = object.shape();
    goals
        .iter()
        .any(|goal| shape.touches_circle(goal.center(), goal.radius()))
}

/// Returns true if the object keeps a buffer's distance from all window edges.
pub fn within_window(object: &dyn HasCollision, window: &Window, granularity: f64) -> bool {
    let shape = object.shape();
    let buffer = buffer(shape.radius(), granularity);
    shape
        .anchors()
        .all(|anchor| window.encloses(anchor, buffer))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Coordinate of `position` along the axis.
    pub fn along(self, position: Position) -> f64 {
        match self {
            Axis::Horizontal => position.x(),
            Axis::Vertical => position.y(),
        }
    }

    /// Coordinate of `position` perpendicular to the axis.
    pub fn across(self, position: Position) -> f64 {
        match self {
            Axis::Horizontal => position.y(),
            Axis::Vertical => position.x(),
        }
    }

    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Disc {
        center: Position,
        radius: f64,
    },
    /// Straight body between two round caps. `body` runs parallel to `axis`.
    Capsule {
        body: Segment,
        radius: f64,
        axis: Axis,
    },
}

impl Shape {
    pub fn radius(&self) -> f64 {
        match self {
            Shape::Disc { radius, .. } | Shape::Capsule { radius, .. } => *radius,
        }
    }

    /// Centroid of a disc, head and tail of a capsule.
    pub fn anchors(&self) -> impl Iterator<Item = Position> {
        let (first, second) = match self {
            Shape::Disc { center, .. } => (*center, None),
            Shape::Capsule { body, .. } => (body.p1(), Some(body.p2())),
        };
        std::iter::once(first).chain(second)
    }

    fn touches_segment(&self, wall: &Segment, buffer: f64) -> bool {
        if self
            .anchors()
            .any(|anchor| is_within(wall.distance_to(anchor), buffer))
        {
            return true;
        }

        match self {
            Shape::Disc { .. } => false,
            Shape::Capsule { body, axis, .. } => {
                // A wall end poking into the side of the body is closer to the body than to
                // either cap.
                if is_within(body.distance_to(wall.p1()), buffer)
                    || is_within(body.distance_to(wall.p2()), buffer)
                {
                    return true;
                }

                let (low, high) = wall.extent(axis.perpendicular());
                let level = axis.across(body.p1());
                low <= level && level <= high && body.intersects(wall)
            }
        }
    }

    fn touches_circle(&self, center: Position, radius: f64) -> bool {
        let reach = self.radius() + radius;
        if self
            .anchors()
            .any(|anchor| is_within(anchor.distance(center), reach))
        {
            return true;
        }

        match self {
            Shape::Disc { .. } => false,
            Shape::Capsule { body, axis, .. } => {
                // Outside the body's extent the closest point is a cap, which is covered above.
                let (low, high) = body.extent(*axis);
                let along = axis.along(center);
                low < along && along < high && is_within(body.line_distance(center), reach)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    p1: Position,
    p2: Position,
}

impl Segment {
    pub fn new(p1: Position, p2: Position) -> Self {
        Self { p1, p2 }
    }

    pub fn p1(&self) -> Position {
        self.p1
    }

    pub fn p2(&self) -> Position {
        self.p2
    }

    pub fn length(&self) -> f64 {
        self.p1.distance(self.p2)
    }

    /// Range covered by the segment along `axis`, lowest first.
    pub fn extent(&self, axis: Axis) -> (f64, f64) {
        let a = axis.along(self.p1);
        let b = axis.along(self.p2);
        (a.min(b), a.max(b))
    }

    /// Euclidean distance from `position` to the closest point of the segment.
    ///
    /// A zero-length segment is treated as a single point.
    pub fn distance_to(&self, position: Position) -> f64 {
        let direction = self.p2 - self.p1;
        let length_squared = direction.dot(direction);
        if length_squared == 0.0 {
            return position.distance(self.p1);
        }

        let t = (position - self.p1).dot(direction) / length_squared;
        if t <= 0.0 {
            position.distance(self.p1)
        } else if t >= 1.0 {
            position.distance(self.p2)
        } else {
            direction.cross(self.p1 - position).abs() / length_squared.sqrt()
        }
    }

    /// Distance from `position` to the infinite line through the segment.
    pub fn line_distance(&self, position: Position) -> f64 {
        let direction = self.p2 - self.p1;
        let length = direction.norm();
        if length == 0.0 {
            return position.distance(self.p1);
        }
        direction.cross(self.p1 - position).abs() / length
    }

    /// Check if the two segments cross or touch.
    ///
    /// Collinear segments intersect if they overlap.
    pub fn intersects(&self, other: &Segment) -> bool {
        let o1 = orientation(self.p1, self.p2, other.p1);
        let o2 = orientation(self.p1, self.p2, other.p2);
        let o3 = orientation(other.p1, other.p2, self.p1);
        let o4 = orientation(other.p1, other.p2, self.p2);

        if o1 * o2 < 0 && o3 * o4 < 0 {
            return true;
        }

        (o1 == 0 && self.contains(other.p1))
            || (o2 == 0 && self.contains(other.p2))
            || (o3 == 0 && other.contains(self.p1))
            || (o4 == 0 && other.contains(self.p2))
    }

    /// Check if `position` lies in the bounding box of the segment.
    pub fn contains(&self, position: Position) -> bool {
        position.x() + f64::EPSILON >= self.p1.x().min(self.p2.x())
            && position.x() - f64::EPSILON <= self.p1.x().max(self.p2.x())
            && position.y() + f64::EPSILON >= self.p1.y().min(self.p2.y())
            && position.y() - f64::EPSILON <= self.p1.y().max(self.p2.y())
    }
}

impl From<(f64, f64, f64, f64)> for Segment {
    fn from((x1, y1, x2, y2): (f64, f64, f64, f64)) -> Self {
        Self::new(Position::new(x1, y1), Position::new(x2, y2))
    }
}

/// Sign of the turn `a -> b -> c`: 1 counter-clockwise, -1 clockwise, 0 collinear.
fn orientation(a: Position, b: Position, c: Position) -> i8 {
    let turn = (b - a).cross(c - a);
    if is_close(turn, 0.0) {
        0
    } else if turn > 0.0 {
        1
    } else {
        -1
    }
}
