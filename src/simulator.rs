//! Discretization and autopilot.
//!
//! The grid is rebuilt whenever the granularity changes. The route to the nearest objective is
//! planned on the grid and replanned after every manual step; the autopilot moves the agent
//! along it one configuration per tick.

use bevy::prelude::*;

use cspace::{
    domain::{Discretizer, Environment},
    search::{shortest_path, shortest_path_from, Route},
};

use crate::resource::{AgentRes, EnvironmentRes, GridRes};

pub struct Simulator;

impl Plugin for Simulator {
    fn build(&self, app: &mut App) {
        app.init_resource::<Plan>()
            .add_systems(Update, (rebuild_grid, plan_route, drive).chain());
    }
}

const GRANULARITIES: [f64; 4] = [2.0, 5.0, 8.0, 10.0];
const STEP_INTERVAL: f32 = 0.15;

#[derive(Resource)]
pub struct Plan {
    granularity: usize,
    route: Option<Route>,
    progress: usize,
    autopilot: bool,
    stale_grid: bool,
    stale_route: bool,
    timer: Timer,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            granularity: 0,
            route: None,
            progress: 0,
            autopilot: false,
            stale_grid: true,
            stale_route: false,
            timer: Timer::from_seconds(STEP_INTERVAL, TimerMode::Repeating),
        }
    }
}

impl Plan {
    pub fn granularity(&self) -> f64 {
        GRANULARITIES[self.granularity]
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Steps left until the objective.
    pub fn remaining(&self) -> Option<usize> {
        self.route
            .as_ref()
            .map(|route| route.len().saturating_sub(self.progress))
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn toggle_autopilot(&mut self) {
        self.autopilot = !self.autopilot;
    }

    pub fn next_granularity(&mut self) {
        self.granularity = (self.granularity + 1) % GRANULARITIES.len();
        self.stale_grid = true;
    }

    pub fn replan(&mut self) {
        self.stale_route = true;
    }
}

fn rebuild_grid(
    mut commands: Commands,
    mut plan: ResMut<Plan>,
    mut agent: ResMut<AgentRes>,
    environment: Res<EnvironmentRes>,
) {
    if !plan.stale_grid {
        return;
    }
    plan.stale_grid = false;

    let grid = Discretizer::new(Environment::clone(&environment), plan.granularity())
        .and_then(|discretizer| discretizer.transform(&agent));
    match grid {
        Ok(grid) => {
            *agent = agent
                .with_configuration(grid.lattice().index_to_config(grid.start()))
                .into();
            plan.route = shortest_path(&grid);
            plan.progress = 0;
            plan.stale_route = false;
            match plan.route() {
                Some(route) => info!(steps = route.len(), explored = route.explored, "Planned route"),
                None => warn!(granularity = plan.granularity(), "No route to an objective"),
            }
            commands.insert_resource(GridRes::from(grid));
        }
        Err(error) => error!("Cannot discretize the environment: {error}"),
    }
}

fn plan_route(mut plan: ResMut<Plan>, grid: Option<Res<GridRes>>, agent: Res<AgentRes>) {
    if !plan.stale_route {
        return;
    }
    let Some(grid) = grid else {
        return;
    };
    plan.stale_route = false;
    plan.progress = 0;
    plan.route = grid
        .lattice()
        .config_to_index(agent.configuration())
        .and_then(|origin| shortest_path_from(&grid, origin));
}

fn drive(
    time: Res<Time>,
    mut plan: ResMut<Plan>,
    grid: Option<Res<GridRes>>,
    mut agent: ResMut<AgentRes>,
) {
    if !plan.autopilot || !plan.timer.tick(time.delta()).just_finished() {
        return;
    }
    let Some(grid) = grid else {
        return;
    };

    let next = plan
        .route
        .as_ref()
        .and_then(|route| route.steps.get(plan.progress + 1).copied());
    match next {
        Some(step) => {
            *agent = agent
                .with_configuration(grid.lattice().index_to_config(step))
                .into();
            plan.progress += 1;
        }
        None => {
            plan.autopilot = false;
            info!("Autopilot stopped");
        }
    }
}
