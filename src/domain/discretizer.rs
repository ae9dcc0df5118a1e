//! Configuration-space discretizer.
//!
//! Samples the configuration space of an agent on a regular lattice and labels every sample by
//! placing the agent there and querying the environment.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::{Agent, Cell, Environment, Grid, Lattice, Position};

#[derive(Error, Debug, PartialEq)]
pub enum DiscretizeError {
    #[error("granularity must be positive and finite, got {0}")]
    InvalidGranularity(f64),
    #[error("window must have a positive finite size, got {width}x{height}")]
    InvalidWindow { width: f64, height: f64 },
    #[error("start position ({x}, {y}) lies outside the grid")]
    StartOutOfBounds { x: f64, y: f64 },
}

#[derive(Clone, Debug)]
pub struct Discretizer {
    environment: Environment,
    lattice: Lattice,
}

impl Discretizer {
    pub fn new(environment: Environment, granularity: f64) -> Result<Self, DiscretizeError> {
        if !(granularity.is_finite() && granularity > 0.0) {
            return Err(DiscretizeError::InvalidGranularity(granularity));
        }
        let window = environment.window();
        let valid = |size: f64| size.is_finite() && size > 0.0;
        if !(valid(window.width()) && valid(window.height())) {
            return Err(DiscretizeError::InvalidWindow {
                width: window.width(),
                height: window.height(),
            });
        }

        let lattice = Lattice::new(window, granularity, Position::default());
        Ok(Self {
            environment,
            lattice,
        })
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn granularity(&self) -> f64 {
        self.lattice.granularity()
    }

    /// Label of `agent` at its current placement, ignoring the start.
    pub fn classify(&self, agent: &Agent) -> Cell {
        let granularity = self.granularity();
        if !self.environment.contains(agent, granularity)
            || self.environment.has_collision(agent, granularity)
        {
            Cell::Wall
        } else if self.environment.reaches_goal(agent) {
            Cell::Objective
        } else {
            Cell::Free
        }
    }

    /// Builds the grid of every configuration of `agent`, with the start at the agent's current
    /// configuration.
    pub fn transform(&self, agent: &Agent) -> Result<Grid, DiscretizeError> {
        let configuration = agent.configuration();
        let start = self.lattice.config_to_index(configuration).ok_or(
            DiscretizeError::StartOutOfBounds {
                x: configuration.position.x(),
                y: configuration.position.y(),
            },
        )?;

        info!(
            columns = self.lattice.columns(),
            rows = self.lattice.rows(),
            granularity = self.granularity(),
            "Discretizing configuration space"
        );

        let mut cells = self
            .lattice
            .indices()
            .map(|index| {
                let placement = agent.with_configuration(self.lattice.index_to_config(index));
                self.classify(&placement)
            })
            .collect::<Vec<_>>();

        let slot = &mut cells[self.lattice.flat(start)];
        if *slot != Cell::Free {
            warn!(
                x = start.x,
                y = start.y,
                shape = %start.shape,
                label = ?*slot,
                "Start overrides a non-free cell"
            );
        }
        *slot = Cell::Start;

        let grid = Grid::from_cells(self.lattice, cells, start);
        debug!(
            walls = grid.count(Cell::Wall),
            objectives = grid.count(Cell::Objective),
            free = grid.count(Cell::Free),
            "Built grid"
        );
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::super::{AgentConfig, AgentShape, Configuration, Goal, GridIndex, Segment, Window};
    use super::*;
    use crate::maps::test1_agent;
    use crate::tests::test1_environment;

    fn small_world() -> (Environment, Agent) {
        let environment = Environment::new(
            vec![Segment::from((30.0, 0.0, 30.0, 20.0))],
            vec![Goal::from((50.0, 30.0, 2.0))],
            Window::new(60.0, 40.0),
        );
        let agent = Agent::new(
            Position::new(10.0, 10.0),
            AgentShape::Disc,
            AgentConfig::new([10.0, 0.0, 10.0], [2.0, 4.0, 2.0]),
        );
        (environment, agent)
    }

    #[test]
    fn test_discretizer_small_world() {
        let (environment, agent) = small_world();
        let grid = Discretizer::new(environment, 5.0)
            .unwrap()
            .transform(&agent)
            .unwrap();

        assert_eq!(grid.dims(), (13, 9, 3));
        assert_eq!(grid.start(), GridIndex::new(2, 2, AgentShape::Disc));
        assert_snapshot!(grid.to_string(), @r"
        %%%%%%%%%%%%%
        %%   %%%   %%
        %%   %%%   %%
        %%   %%%   %%
        %%   %%%   %%
        %%         %%
        %%       ..%%
        %%         %%
        %%%%%%%%%%%%%

        %%%%%%%%%%%%%
        %%%%%%%%%%%%%
        %%P  %%%   %%
        %%   %%%   %%
        %%   %%%   %%
        %%    %    %%
        %%        .%%
        %%%%%%%%%%%%%
        %%%%%%%%%%%%%

        %%%%%%%%%%%%%
        %%%%%%%%%%%%%
        %     %     %
        %     %     %
        %     %     %
        %     %   . %
        %         . %
        %%%%%%%%%%%%%
        %%%%%%%%%%%%%
        ");
    }

    #[test]
    fn test_discretizer_boundary_walls_match_window_check() {
        let (environment, agent) = small_world();
        let plain = Discretizer::new(environment.clone(), 5.0)
            .unwrap()
            .transform(&agent)
            .unwrap();
        let bounded = Discretizer::new(environment.with_boundary_walls(), 5.0)
            .unwrap()
            .transform(&agent)
            .unwrap();
        assert!(plain.differences(&bounded).is_empty());
    }

    #[rstest]
    #[case::granularity_2(2.0, (111, 101, 3), (15, 60), [23148, 10345, 139])]
    #[case::granularity_5(5.0, (45, 41, 3), (6, 24), [4152, 1366, 16])]
    #[case::granularity_8(8.0, (28, 26, 3), (3, 15), [1765, 415, 3])]
    #[case::granularity_10(10.0, (23, 21, 3), (3, 12), [1214, 232, 2])]
    fn test_discretizer_test1(
        #[case] granularity: f64,
        #[case] dims: (usize, usize, usize),
        #[case] start: (usize, usize),
        #[case] counts: [usize; 3],
    ) {
        let discretizer =
            Discretizer::new(test1_environment().with_boundary_walls(), granularity).unwrap();
        let grid = discretizer.transform(&test1_agent()).unwrap();

        assert_eq!(grid.dims(), dims);
        assert_eq!(
            grid.start(),
            GridIndex::new(start.0, start.1, AgentShape::Disc)
        );
        assert_eq!(
            [
                grid.count(Cell::Wall),
                grid.count(Cell::Free),
                grid.count(Cell::Objective),
                grid.count(Cell::Start),
            ],
            [counts[0], counts[1], counts[2], 1]
        );
    }

    #[rstest]
    #[case(1.0)]
    #[case(2.0)]
    #[case(5.0)]
    #[case(8.0)]
    #[case(10.0)]
    fn test_discretizer_round_trip(#[case] granularity: f64) {
        let discretizer = Discretizer::new(test1_environment(), granularity).unwrap();
        let lattice = discretizer.lattice();
        for index in lattice.indices() {
            assert_eq!(
                lattice.config_to_index(lattice.index_to_config(index)),
                Some(index)
            );
        }
    }

    #[test]
    fn test_discretizer_is_deterministic() {
        let discretizer = Discretizer::new(test1_environment().with_boundary_walls(), 8.0).unwrap();
        let first = discretizer.transform(&test1_agent()).unwrap();
        let second = discretizer.transform(&test1_agent()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_discretizer_start_overrides_wall() {
        let (environment, agent) = small_world();
        let agent = agent.with_configuration(Configuration::new(
            Position::new(30.0, 10.0),
            AgentShape::Vertical,
        ));
        let discretizer = Discretizer::new(environment, 5.0).unwrap();
        let start = GridIndex::new(6, 2, AgentShape::Vertical);

        // The start label replaces the cell's own classification, even a wall. A grid may thus
        // start inside an obstacle.
        let on_wall = discretizer.classify(&agent);
        let grid = discretizer.transform(&agent).unwrap();

        assert_eq!(on_wall, Cell::Wall);
        assert_eq!(grid.start(), start);
        assert_eq!(grid.get(start), Some(Cell::Start));
        assert_eq!(grid.count(Cell::Start), 1);
    }

    #[test]
    fn test_discretizer_start_between_samples() {
        let (environment, agent) = small_world();
        let agent = agent.with_centroid(Position::new(12.4, 14.9));
        let grid = Discretizer::new(environment, 5.0)
            .unwrap()
            .transform(&agent)
            .unwrap();
        assert_eq!(grid.start(), GridIndex::new(2, 2, AgentShape::Disc));
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-2.0)]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn test_discretizer_invalid_granularity(#[case] granularity: f64) {
        let result = Discretizer::new(test1_environment(), granularity);
        assert!(matches!(
            result,
            Err(DiscretizeError::InvalidGranularity(_))
        ));
    }

    #[test]
    fn test_discretizer_invalid_window() {
        let environment = Environment::new(vec![], vec![], Window::new(0.0, 10.0));
        assert_eq!(
            Discretizer::new(environment, 1.0).unwrap_err(),
            DiscretizeError::InvalidWindow {
                width: 0.0,
                height: 10.0
            }
        );
    }

    #[rstest]
    #[case::beyond_width((230.0, 100.0))]
    #[case::negative((10.0, -1.0))]
    fn test_discretizer_start_out_of_bounds(#[case] centroid: (f64, f64)) {
        let discretizer = Discretizer::new(test1_environment(), 10.0).unwrap();
        let agent = test1_agent().with_centroid(centroid.into());
        assert_eq!(
            discretizer.transform(&agent).unwrap_err(),
            DiscretizeError::StartOutOfBounds {
                x: centroid.0,
                y: centroid.1
            }
        );
    }
}
