//! 2D visualization.
//!
//! Draws the walls, goals, the wall and objective cells of the agent's current shape layer, the
//! planned route and the agent itself.

use bevy::prelude::*;

use cspace::{
    domain::{Cell, HasCollision, Position, Shape, Window},
    maps,
};

use crate::{
    resource::{AgentRes, EnvironmentRes, GridRes},
    simulator::Plan,
};

pub struct Visualizer;

impl Plugin for Visualizer {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, set_up)
            .add_systems(Update, (update_text, handle_keyboard_input, draw_scene))
            .insert_resource(create_agent())
            .insert_resource(create_environment())
            .init_resource::<Scene>();
    }
}

#[derive(Resource, Default)]
pub struct Scene {
    show_text: bool,
}

fn create_agent() -> AgentRes {
    maps::test1_agent().into()
}

fn create_environment() -> EnvironmentRes {
    maps::test1_environment().with_boundary_walls().into()
}

fn set_up(mut commands: Commands, environment: Res<EnvironmentRes>) {
    create_camera(environment.window(), &mut commands);
    create_text(&mut commands);
}

const CAMERA_SCALE: f32 = 0.35;

fn create_camera(window: &Window, commands: &mut Commands) {
    let mut camera = Camera2dBundle::default();
    let center = to_bevy_position(Position::new(window.width() / 2.0, window.height() / 2.0));
    camera.transform.translation = center.extend(camera.transform.translation.z);
    camera.projection.scale = CAMERA_SCALE;
    commands.spawn(camera);
}

fn create_text(commands: &mut Commands) {
    let text_style = TextStyle {
        font_size: 20.0,
        ..default()
    };
    commands.spawn(
        TextBundle::from_sections(vec![TextSection::new("", text_style)]).with_style(Style {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        }),
    );
}

fn draw_scene(
    mut gizmos: Gizmos,
    environment: Res<EnvironmentRes>,
    agent: Res<AgentRes>,
    grid: Option<Res<GridRes>>,
    plan: Res<Plan>,
) {
    if let Some(grid) = grid {
        let lattice = grid.lattice();
        let size = Vec2::splat(lattice.granularity() as f32 * 0.4);
        for index in grid.indices().filter(|index| index.shape == agent.agent_shape()) {
            let color = match grid.get(index) {
                Some(Cell::Wall) => Color::DARK_GRAY,
                Some(Cell::Objective) => Color::YELLOW,
                _ => continue,
            };
            let position = to_bevy_position(lattice.index_to_config(index).position);
            gizmos.rect_2d(position, 0.0, size, color);
        }

        if let Some(route) = plan.route() {
            gizmos.linestrip_2d(
                route
                    .steps
                    .iter()
                    .map(|step| to_bevy_position(lattice.index_to_config(*step).position)),
                Color::ORANGE,
            );
        }
    }

    for wall in environment.walls() {
        gizmos.line_2d(
            to_bevy_position(wall.p1()),
            to_bevy_position(wall.p2()),
            Color::WHITE,
        );
    }

    for goal in environment.goals() {
        gizmos.circle_2d(
            to_bevy_position(goal.center()),
            goal.radius() as f32,
            Color::GREEN,
        );
    }

    match agent.shape() {
        Shape::Disc { center, radius } => {
            gizmos.circle_2d(to_bevy_position(center), radius as f32, Color::CYAN);
        }
        Shape::Capsule { body, radius, .. } => {
            let (head, tail) = (to_bevy_position(body.p1()), to_bevy_position(body.p2()));
            let offset = (tail - head).perp().normalize_or_zero() * radius as f32;
            gizmos.line_2d(head + offset, tail + offset, Color::CYAN);
            gizmos.line_2d(head - offset, tail - offset, Color::CYAN);
            gizmos.circle_2d(head, radius as f32, Color::CYAN);
            gizmos.circle_2d(tail, radius as f32, Color::CYAN);
        }
    }
}

fn update_text(
    mut text: Query<&mut Text>,
    scene: Res<Scene>,
    agent: Res<AgentRes>,
    grid: Option<Res<GridRes>>,
    plan: Res<Plan>,
) {
    let mut text = text.single_mut();
    if scene.show_text {
        let cell = grid
            .as_ref()
            .and_then(|grid| grid.lattice().config_to_index(agent.configuration()))
            .map_or("---".to_string(), |index| format!("({}, {})", index.x, index.y));
        let route = plan
            .remaining()
            .map_or("none".to_string(), |steps| format!("{steps} steps"));
        let autopilot = if plan.autopilot() { "on" } else { "off" };
        text.sections[0].value = format!(
            "SHAPE: {}   CELL: {cell}   GRANULARITY: {}   ROUTE: {route}   AUTOPILOT: {autopilot}",
            agent.agent_shape(),
            plan.granularity(),
        );
    } else {
        text.sections[0].value = String::new();
    }
}

fn handle_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut scene: ResMut<Scene>,
    mut agent: ResMut<AgentRes>,
    mut plan: ResMut<Plan>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        *agent = create_agent();
        plan.replan();
    }

    if keys.just_pressed(KeyCode::KeyT) {
        scene.show_text = !scene.show_text;
    }
}

fn to_bevy_position(position: Position) -> Vec2 {
    Vec2::from(<(f32, f32)>::from(position))
}
