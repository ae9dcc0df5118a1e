//! Built-in worlds.

use crate::domain::{Agent, AgentConfig, AgentShape, Environment, Goal, Position, Segment, Window};

/// The "Test1" corridor map: a 220×200 window, a corridor leading right from the start and a
/// pocket holding a single goal. Boundary walls are not included.
pub fn test1_environment() -> Environment {
    let walls = [
        (0.0, 100.0, 100.0, 100.0),
        (0.0, 140.0, 100.0, 140.0),
        (100.0, 100.0, 140.0, 110.0),
        (100.0, 140.0, 140.0, 130.0),
        (140.0, 110.0, 175.0, 70.0),
        (140.0, 130.0, 200.0, 130.0),
        (200.0, 130.0, 200.0, 10.0),
        (200.0, 10.0, 140.0, 10.0),
        (175.0, 70.0, 140.0, 70.0),
        (140.0, 70.0, 130.0, 55.0),
        (140.0, 10.0, 130.0, 25.0),
        (130.0, 55.0, 90.0, 55.0),
        (130.0, 25.0, 90.0, 25.0),
        (90.0, 55.0, 90.0, 25.0),
    ];

    Environment::new(
        walls.into_iter().map(Segment::from).collect(),
        vec![Goal::from((110.0, 40.0, 10.0))],
        Window::new(220.0, 200.0),
    )
}

/// Agent of the "Test1" map, a disc at the left end of the corridor.
pub fn test1_agent() -> Agent {
    Agent::new(
        Position::new(30.0, 120.0),
        AgentShape::Disc,
        AgentConfig::new([40.0, 0.0, 40.0], [11.0, 25.0, 11.0]),
    )
}
