//! Environment with walls, goals and window bounds.

use super::{
    collision::{touches_goal, touches_wall, within_window},
    is_close, HasCollision, Position, Segment,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Environment {
    walls: Vec<Segment>,
    goals: Vec<Goal>,
    window: Window,
}

impl Environment {
    pub fn new(walls: Vec<Segment>, goals: Vec<Goal>, window: Window) -> Self {
        Self {
            walls,
            goals,
            window,
        }
    }

    /// Adds the four window edges as walls.
    pub fn with_boundary_walls(mut self) -> Self {
        self.walls.extend(self.window.edges());
        self
    }

    pub fn walls(&self) -> &[Segment] {
        &self.walls
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn has_collision(&self, object: &dyn HasCollision, granularity: f64) -> bool {
        touches_wall(object, &self.walls, granularity)
    }

    pub fn reaches_goal(&self, object: &dyn HasCollision) -> bool {
        touches_goal(object, &self.goals)
    }

    pub fn contains(&self, object: &dyn HasCollision, granularity: f64) -> bool {
        within_window(object, &self.window, granularity)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Goal {
    center: Position,
    radius: f64,
}

impl Goal {
    pub fn new(center: Position, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl From<(f64, f64, f64)> for Goal {
    fn from((x, y, radius): (f64, f64, f64)) -> Self {
        Self::new(Position::new(x, y), radius)
    }
}

/// Workspace bounds with the origin in the lower-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    width: f64,
    height: f64,
}

impl Window {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Check if a disc of radius `margin` around `position` stays strictly inside the window.
    /// Touching an edge counts as leaving.
    pub fn encloses(&self, position: Position, margin: f64) -> bool {
        let inside = |value: f64, limit: f64| {
            let low = value - margin;
            let high = value + margin;
            !(low < 0.0 || is_close(low, 0.0) || high > limit || is_close(high, limit))
        };
        inside(position.x(), self.width) && inside(position.y(), self.height)
    }

    pub fn edges(&self) -> [Segment; 4] {
        let (w, h) = (self.width, self.height);
        [
            Segment::from((0.0, 0.0, 0.0, h)),
            Segment::from((0.0, 0.0, w, 0.0)),
            Segment::from((w, 0.0, w, h)),
            Segment::from((0.0, h, w, h)),
        ]
    }
}

impl From<(f64, f64)> for Window {
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::super::{Agent, AgentConfig, AgentShape};
    use super::*;
    use crate::tests::{test1_agent_config, test1_environment};

    #[test]
    fn test_environment_with_boundary_walls() {
        let environment = Environment::new(
            vec![Segment::from((10.0, 10.0, 20.0, 20.0))],
            vec![],
            Window::new(30.0, 40.0),
        )
        .with_boundary_walls();
        assert_eq!(environment.walls().len(), 5);
        assert_eq!(
            environment.walls()[4],
            Segment::from((0.0, 40.0, 30.0, 40.0))
        );
    }

    #[test]
    fn test_environment_boundary_walls_block_edges() {
        let environment =
            Environment::new(vec![], vec![], Window::new(100.0, 100.0)).with_boundary_walls();
        let agent = Agent::new(
            Position::new(3.0, 50.0),
            AgentShape::Disc,
            AgentConfig::new([0.0; 3], [4.0; 3]),
        );
        assert!(environment.has_collision(&agent, 2.0));
        assert!(!environment.has_collision(&agent.with_centroid(Position::new(50.0, 50.0)), 2.0));
    }

    #[rstest]
    #[case::inside((50.0, 50.0), 10.0, true)]
    #[case::touching_left((10.0, 50.0), 10.0, false)]
    #[case::touching_top((50.0, 90.0), 10.0, false)]
    #[case::crossing_right((95.0, 50.0), 10.0, false)]
    #[case::crossing_bottom((50.0, -1.0), 0.0, false)]
    #[case::just_inside((10.1, 89.9), 10.0, true)]
    fn test_window_encloses(
        #[case] position: (f64, f64),
        #[case] margin: f64,
        #[case] expected: bool,
    ) {
        let window = Window::new(100.0, 100.0);
        assert_eq!(window.encloses(position.into(), margin), expected);
    }

    /// Geometry truth table for the "Test1" map. Each row holds the expected results of
    /// (touches wall, touches goal, within window) for the disc, the horizontal capsule and the
    /// vertical capsule at that centroid, without granularity.
    #[rstest]
    #[case::start_on_wall(            (0.0, 100.0),    [(true, false, false), (true, false, false), (true, false, false)])]
    #[case::window_margin(            (25.6, 25.6),    [(false, false, true), (false, false, true), (false, false, true)])]
    #[case::window_margin_touching(   (25.5, 25.5),    [(false, false, true), (false, false, false), (false, false, false)])]
    #[case::window_far_margin(        (194.4, 174.4),  [(false, false, true), (false, false, true), (false, false, true)])]
    #[case::window_far_touching(      (194.5, 174.5),  [(false, false, true), (false, false, false), (false, false, false)])]
    #[case::wall_disc_touching(       (30.0, 112.0),   [(true, false, true), (false, false, true), (true, false, true)])]
    #[case::wall_disc_clear(          (30.0, 113.0),   [(false, false, true), (false, false, true), (true, false, true)])]
    #[case::wall_capsule_touching(    (30.0, 105.5),   [(true, false, true), (true, false, true), (true, false, true)])]
    #[case::wall_capsule_clear(       (30.0, 105.6),   [(true, false, true), (false, false, true), (true, false, true)])]
    #[case::corridor_top(             (30.0, 135.0),   [(true, false, true), (true, false, true), (true, false, true)])]
    #[case::corridor_bend(            (140.0, 120.0),  [(true, false, true), (false, false, true), (true, false, true)])]
    #[case::corner(                   (187.5, 70.0),   [(true, false, true), (true, false, true), (false, false, true)])]
    #[case::goal_center(              (110.0, 40.0),   [(false, true, true), (true, true, true), (true, true, true)])]
    #[case::goal_horizontal_tangent(  (145.5, 40.0),   [(false, false, true), (false, true, true), (false, false, true)])]
    #[case::goal_disc_tangent(        (110.0, 62.5),   [(true, true, true), (true, false, true), (true, true, true)])]
    #[case::parallel_wall(            (50.0, 100.0),   [(true, false, true), (true, false, true), (true, false, true)])]
    #[case::crossing_wall(            (200.0, 100.0),  [(true, false, true), (true, false, false), (true, false, true)])]
    #[case::out_of_bounds(            (205.5, 100.0),  [(true, false, true), (true, false, false), (true, false, true)])]
    fn test_environment_truth_table(
        #[case] centroid: (f64, f64),
        #[case] expected: [(bool, bool, bool); 3],
    ) {
        let environment = test1_environment();
        for (shape, expected) in [AgentShape::Disc, AgentShape::Horizontal, AgentShape::Vertical]
            .into_iter()
            .zip(expected)
        {
            let agent = Agent::new(centroid.into(), shape, test1_agent_config());
            assert_eq!(
                (
                    environment.has_collision(&agent, 0.0),
                    environment.reaches_goal(&agent),
                    environment.contains(&agent, 0.0),
                ),
                expected,
                "{shape} at {centroid:?}"
            );
        }
    }

    #[rstest]
    #[case::wall_along_body((50.0, 100.0), AgentShape::Horizontal, 100.0, (true, false, false))]
    #[case::body_over_goal((110.0, 55.0), AgentShape::Horizontal, 100.0, (true, true, true))]
    #[case::body_along_wall((200.0, 70.0), AgentShape::Vertical, 120.0, (true, false, true))]
    fn test_environment_long_capsule(
        #[case] centroid: (f64, f64),
        #[case] shape: AgentShape,
        #[case] length: f64,
        #[case] expected: (bool, bool, bool),
    ) {
        let environment = test1_environment();
        let config = AgentConfig::new([length, 0.0, length], test1_agent_config().widths);
        let agent = Agent::new(centroid.into(), shape, config);
        assert_eq!(
            (
                environment.has_collision(&agent, 0.0),
                environment.reaches_goal(&agent),
                environment.contains(&agent, 0.0),
            ),
            expected
        );
    }
}
