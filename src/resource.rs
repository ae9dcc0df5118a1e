//! The resource module encapsulates domain entities for use with Bevy.

use std::ops::Deref;

use bevy::ecs::system::Resource;

use cspace::domain;

#[derive(Resource)]
pub struct AgentRes(domain::Agent);

impl Deref for AgentRes {
    type Target = domain::Agent;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<domain::Agent> for AgentRes {
    fn from(value: domain::Agent) -> Self {
        Self(value)
    }
}

#[derive(Resource)]
pub struct EnvironmentRes(domain::Environment);

impl Deref for EnvironmentRes {
    type Target = domain::Environment;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<domain::Environment> for EnvironmentRes {
    fn from(value: domain::Environment) -> Self {
        Self(value)
    }
}

/// Grid of the current granularity. Absent until the first discretization succeeded.
#[derive(Resource)]
pub struct GridRes(domain::Grid);

impl Deref for GridRes {
    type Target = domain::Grid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<domain::Grid> for GridRes {
    fn from(value: domain::Grid) -> Self {
        Self(value)
    }
}
