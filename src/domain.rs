//! The domain module encapsulates the core logic. It defines the `Agent` and `Environment`
//! entities, the geometric rules governing their interactions, and the discretization of the
//! agent's configuration space into a `Grid`.
//!
//! The module has no dependency on the viewer, so it can be used and tested on its own.

mod agent;
mod basis;
mod collision;
mod discretizer;
mod environment;
mod grid;

pub use agent::{Agent, AgentConfig, AgentError, AgentShape, Configuration};
pub use basis::{is_close, is_within, Position, ABSOLUTE_TOLERANCE, RELATIVE_TOLERANCE};
pub use collision::{
    buffer, touches_goal, touches_wall, within_window, Axis, HasCollision, Segment, Shape,
};
pub use discretizer::{DiscretizeError, Discretizer};
pub use environment::{Environment, Goal, Window};
pub use grid::{Cell, Grid, GridError, GridIndex, Lattice};
