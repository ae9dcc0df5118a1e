//! Breadth-first search over a discretized configuration space.
//!
//! Every step (a unit move or a shape change) has the same cost, so the first objective reached
//! by the search lies at the end of a shortest path.

use std::collections::VecDeque;

use tracing::debug;

use crate::domain::{Grid, GridIndex};

#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Configurations from the origin to the objective, both included.
    pub steps: Vec<GridIndex>,
    /// Number of states taken off the frontier.
    pub explored: usize,
}

impl Route {
    pub fn origin(&self) -> Option<GridIndex> {
        self.steps.first().copied()
    }

    pub fn objective(&self) -> Option<GridIndex> {
        self.steps.last().copied()
    }

    /// Number of steps between the origin and the objective.
    pub fn len(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shortest route from the grid's start to the nearest objective.
pub fn shortest_path(grid: &Grid) -> Option<Route> {
    shortest_path_from(grid, grid.start())
}

/// Shortest route from `origin` to the nearest objective, `None` when no objective is reachable.
pub fn shortest_path_from(grid: &Grid, origin: GridIndex) -> Option<Route> {
    grid.get(origin)?;
    if grid.is_objective(origin) {
        return Some(Route {
            steps: vec![origin],
            explored: 0,
        });
    }

    let lattice = grid.lattice();
    let mut previous: Vec<Option<GridIndex>> = vec![None; lattice.len()];
    let mut visited = vec![false; lattice.len()];
    let mut frontier = VecDeque::from([origin]);
    visited[lattice.flat(origin)] = true;
    let mut explored = 0;

    while let Some(current) = frontier.pop_front() {
        explored += 1;
        for next in grid.neighbors(current) {
            let slot = lattice.flat(next);
            if visited[slot] {
                continue;
            }
            visited[slot] = true;
            previous[slot] = Some(current);

            if grid.is_objective(next) {
                let mut steps = vec![next];
                while let Some(step) = previous[lattice.flat(steps[steps.len() - 1])] {
                    steps.push(step);
                }
                steps.reverse();
                debug!(steps = steps.len(), explored, "Found objective");
                return Some(Route { steps, explored });
            }
            frontier.push_back(next);
        }
    }

    debug!(explored, "No reachable objective");
    None
}
