//! Controller steering the agent.
//!
//! The arrow keys move the agent by one grid cell, Q and E change its shape. Steps are validated
//! against the grid, so the agent never enters a wall cell. Space toggles the autopilot and G
//! switches to the next granularity.

use bevy::prelude::*;

use cspace::domain::{AgentShape, GridIndex};

use crate::{
    resource::{AgentRes, GridRes},
    simulator::Plan,
};

pub struct Controller;

impl Plugin for Controller {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, control);
    }
}

fn control(
    keys: Res<ButtonInput<KeyCode>>,
    grid: Option<Res<GridRes>>,
    mut agent: ResMut<AgentRes>,
    mut plan: ResMut<Plan>,
) {
    if keys.just_pressed(KeyCode::Space) {
        plan.toggle_autopilot();
    }

    if keys.just_pressed(KeyCode::KeyG) {
        plan.next_granularity();
    }

    let Some(grid) = grid else {
        return;
    };
    let Some(current) = grid.lattice().config_to_index(agent.configuration()) else {
        return;
    };
    let Some(target) = requested_step(&keys, current) else {
        return;
    };

    if grid.neighbors(current).contains(&target) {
        *agent = agent
            .with_configuration(grid.lattice().index_to_config(target))
            .into();
        plan.replan();
    } else {
        debug!(?current, ?target, "Rejected step");
    }
}

fn requested_step(keys: &ButtonInput<KeyCode>, current: GridIndex) -> Option<GridIndex> {
    let GridIndex { x, y, shape } = current;
    let moved = |x: Option<usize>, y: Option<usize>| Some(GridIndex::new(x?, y?, shape));
    let turned = |index: Option<usize>| {
        let shape = AgentShape::try_from(index?).ok()?;
        Some(GridIndex::new(x, y, shape))
    };

    if keys.just_pressed(KeyCode::ArrowLeft) {
        moved(x.checked_sub(1), Some(y))
    } else if keys.just_pressed(KeyCode::ArrowRight) {
        moved(Some(x + 1), Some(y))
    } else if keys.just_pressed(KeyCode::ArrowDown) {
        moved(Some(x), y.checked_sub(1))
    } else if keys.just_pressed(KeyCode::ArrowUp) {
        moved(Some(x), Some(y + 1))
    } else if keys.just_pressed(KeyCode::KeyQ) {
        turned(shape.index().checked_sub(1))
    } else if keys.just_pressed(KeyCode::KeyE) {
        turned(Some(shape.index() + 1))
    } else {
        None
    }
}
