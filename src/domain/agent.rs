//! Agent with three interchangeable body shapes: a horizontal capsule, a disc and a vertical
//! capsule.
//!
//! An `Agent` is a placement of the agent in the workspace. It is a plain value: moving the agent
//! or changing its shape yields a new `Agent` instead of mutating an existing one.

use std::{fmt, slice::Iter};

use thiserror::Error;

use super::{Axis, HasCollision, Position, Segment, Shape};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Agent {
    centroid: Position,
    shape: AgentShape,
    config: AgentConfig,
}

impl Agent {
    pub fn new(centroid: Position, shape: AgentShape, config: AgentConfig) -> Self {
        Self {
            centroid,
            shape,
            config,
        }
    }

    pub fn centroid(&self) -> Position {
        self.centroid
    }

    pub fn agent_shape(&self) -> AgentShape {
        self.shape
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn radius(&self) -> f64 {
        self.config.radius(self.shape)
    }

    pub fn half_length(&self) -> f64 {
        self.config.half_length(self.shape)
    }

    pub fn configuration(&self) -> Configuration {
        Configuration::new(self.centroid, self.shape)
    }

    /// Head and tail of the capsule body, `None` for a disc.
    pub fn head_and_tail(&self) -> Option<(Position, Position)> {
        let h = self.half_length();
        match self.shape {
            AgentShape::Horizontal => Some((
                self.centroid + Position::new(h, 0.0),
                self.centroid - Position::new(h, 0.0),
            )),
            AgentShape::Vertical => Some((
                self.centroid - Position::new(0.0, h),
                self.centroid + Position::new(0.0, h),
            )),
            AgentShape::Disc => None,
        }
    }

    /// The same agent placed at `configuration`.
    pub fn with_configuration(&self, configuration: Configuration) -> Agent {
        Agent::new(configuration.position, configuration.shape, self.config)
    }

    pub fn with_centroid(&self, centroid: Position) -> Agent {
        Agent::new(centroid, self.shape, self.config)
    }

    pub fn with_shape(&self, shape: AgentShape) -> Agent {
        Agent::new(self.centroid, shape, self.config)
    }
}

impl HasCollision for Agent {
    fn shape(&self) -> Shape {
        match (self.head_and_tail(), self.shape.axis()) {
            (Some((head, tail)), Some(axis)) => Shape::Capsule {
                body: Segment::new(head, tail),
                radius: self.radius(),
                axis,
            },
            _ => Shape::Disc {
                center: self.centroid,
                radius: self.radius(),
            },
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum AgentError {
    #[error("invalid shape index {0}")]
    InvalidShapeIndex(usize),
}

/// Body dimensions of every shape, indexed by [`AgentShape::index`].
///
/// Lengths are full body lengths between head and tail (zero for the disc), widths are full body
/// widths. The collision radius of a shape is half its width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentConfig {
    pub lengths: [f64; 3],
    pub widths: [f64; 3],
}

impl AgentConfig {
    pub const fn new(lengths: [f64; 3], widths: [f64; 3]) -> Self {
        AgentConfig { lengths, widths }
    }

    pub fn half_length(&self, shape: AgentShape) -> f64 {
        match shape {
            AgentShape::Disc => 0.0,
            _ => self.lengths[shape.index()] / 2.0,
        }
    }

    pub fn radius(&self, shape: AgentShape) -> f64 {
        self.widths[shape.index()] / 2.0
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum AgentShape {
    Horizontal,
    Disc,
    Vertical,
}

impl AgentShape {
    pub const COUNT: usize = 3;

    pub fn iter() -> Iter<'static, AgentShape> {
        static SHAPES: [AgentShape; AgentShape::COUNT] =
            [AgentShape::Horizontal, AgentShape::Disc, AgentShape::Vertical];
        SHAPES.iter()
    }

    pub fn index(self) -> usize {
        match self {
            AgentShape::Horizontal => 0,
            AgentShape::Disc => 1,
            AgentShape::Vertical => 2,
        }
    }

    /// Axis of the capsule body, `None` for the disc.
    pub fn axis(self) -> Option<Axis> {
        match self {
            AgentShape::Horizontal => Some(Axis::Horizontal),
            AgentShape::Vertical => Some(Axis::Vertical),
            AgentShape::Disc => None,
        }
    }

    /// Shapes reachable in a single transformation. Capsules can only turn into the disc.
    pub fn neighbors(self) -> &'static [AgentShape] {
        match self {
            AgentShape::Horizontal => &[AgentShape::Disc],
            AgentShape::Disc => &[AgentShape::Horizontal, AgentShape::Vertical],
            AgentShape::Vertical => &[AgentShape::Disc],
        }
    }
}

impl TryFrom<usize> for AgentShape {
    type Error = AgentError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AgentShape::Horizontal),
            1 => Ok(AgentShape::Disc),
            2 => Ok(AgentShape::Vertical),
            _ => Err(AgentError::InvalidShapeIndex(value)),
        }
    }
}

impl fmt::Display for AgentShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentShape::Horizontal => write!(f, "Horizontal"),
            AgentShape::Disc => write!(f, "Disc"),
            AgentShape::Vertical => write!(f, "Vertical"),
        }
    }
}

/// Continuous configuration of the agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Configuration {
    pub position: Position,
    pub shape: AgentShape,
}

impl Configuration {
    pub fn new(position: Position, shape: AgentShape) -> Self {
        Self { position, shape }
    }
}
