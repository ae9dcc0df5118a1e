//! Collision geometry and configuration-space discretization for a shape-changing agent.
//!
//! [`domain`] holds the geometric model and turns a world into a labelled [`domain::Grid`];
//! [`search`] walks that grid to the nearest objective. [`maps`] holds built-in worlds.

pub mod domain;
pub mod maps;
pub mod search;
