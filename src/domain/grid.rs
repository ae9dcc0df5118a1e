//! Discretized configuration space.
//!
//! A [`Grid`] labels every sampled configuration `(column, row, shape)` of the agent. Cells are
//! stored row-major over `(column, row, shape)`, so the three shape layers of one position are
//! adjacent in memory.

use std::fmt;

use thiserror::Error;

use super::{AgentShape, Configuration, Position, Window};

/// Slack added before flooring so that `index * granularity / granularity` maps back to `index`.
const INDEX_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GridIndex {
    pub x: usize,
    pub y: usize,
    pub shape: AgentShape,
}

impl GridIndex {
    pub fn new(x: usize, y: usize, shape: AgentShape) -> Self {
        Self { x, y, shape }
    }
}

/// Mapping between continuous configurations and grid indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lattice {
    granularity: f64,
    offset: Position,
    columns: usize,
    rows: usize,
}

impl Lattice {
    /// Lattice covering `window` from `offset` with one sample every `granularity` units, both
    /// edges included. `granularity` must be positive and finite.
    pub(super) fn new(window: &Window, granularity: f64, offset: Position) -> Self {
        Self {
            granularity,
            offset,
            columns: cell_floor(window.width() / granularity) as usize + 1,
            rows: cell_floor(window.height() / granularity) as usize + 1,
        }
    }

    pub fn granularity(&self) -> f64 {
        self.granularity
    }

    pub fn offset(&self) -> Position {
        self.offset
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.columns * self.rows * AgentShape::COUNT
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: GridIndex) -> bool {
        index.x < self.columns && index.y < self.rows
    }

    /// Grid index of the sample at or below `configuration`, `None` outside the lattice.
    pub fn config_to_index(&self, configuration: Configuration) -> Option<GridIndex> {
        let x = cell_floor((configuration.position.x() - self.offset.x()) / self.granularity);
        let y = cell_floor((configuration.position.y() - self.offset.y()) / self.granularity);
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let index = GridIndex::new(x as usize, y as usize, configuration.shape);
        self.contains(index).then_some(index)
    }

    pub fn index_to_config(&self, index: GridIndex) -> Configuration {
        Configuration::new(
            Position::new(
                index.x as f64 * self.granularity + self.offset.x(),
                index.y as f64 * self.granularity + self.offset.y(),
            ),
            index.shape,
        )
    }

    /// All indices in storage order.
    pub fn indices(&self) -> impl Iterator<Item = GridIndex> + '_ {
        (0..self.columns).flat_map(move |x| {
            (0..self.rows).flat_map(move |y| {
                AgentShape::iter().map(move |shape| GridIndex::new(x, y, *shape))
            })
        })
    }

    /// Position of `index` in storage order.
    pub fn flat(&self, index: GridIndex) -> usize {
        (index.x * self.rows + index.y) * AgentShape::COUNT + index.shape.index()
    }
}

fn cell_floor(value: f64) -> f64 {
    (value + INDEX_TOLERANCE).floor()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Cell {
    Free,
    Wall,
    Objective,
    Start,
}

impl Cell {
    pub fn as_char(self) -> char {
        match self {
            Cell::Free => ' ',
            Cell::Wall => '%',
            Cell::Objective => '.',
            Cell::Start => 'P',
        }
    }
}

impl TryFrom<char> for Cell {
    type Error = GridError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            ' ' => Ok(Cell::Free),
            '%' => Ok(Cell::Wall),
            '.' => Ok(Cell::Objective),
            'P' => Ok(Cell::Start),
            _ => Err(GridError::UnknownCell(value)),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum GridError {
    #[error("unknown cell character {0:?}")]
    UnknownCell(char),
    #[error("expected {expected} columns in row {row} of layer {layer}, found {found}")]
    RaggedRow {
        layer: usize,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("expected {expected} rows in layer {layer}, found {found}")]
    RowCount {
        layer: usize,
        expected: usize,
        found: usize,
    },
    #[error("expected one layer per shape, found {0} layers")]
    LayerCount(usize),
    #[error("grid has no start cell")]
    MissingStart,
    #[error("grid has more than one start cell")]
    MultipleStarts,
    #[error("grid is empty")]
    Empty,
    #[error("granularity must be positive and finite, got {0}")]
    InvalidGranularity(f64),
}

/// Labelled configuration space, immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    lattice: Lattice,
    cells: Vec<Cell>,
    start: GridIndex,
}

impl Grid {
    /// `cells` must be in storage order and cover the whole lattice.
    pub(super) fn from_cells(lattice: Lattice, cells: Vec<Cell>, start: GridIndex) -> Self {
        debug_assert_eq!(cells.len(), lattice.len());
        Self {
            lattice,
            cells,
            start,
        }
    }

    /// Reads the text form written by `Display`.
    pub fn parse(text: &str, granularity: f64) -> Result<Grid, GridError> {
        if !(granularity.is_finite() && granularity > 0.0) {
            return Err(GridError::InvalidGranularity(granularity));
        }

        let layers = text
            .split("\n\n")
            .map(|layer| layer.lines().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        if layers.len() != AgentShape::COUNT {
            return Err(GridError::LayerCount(layers.len()));
        }

        let rows = layers[0].len();
        let columns = layers[0].first().map_or(0, |row| row.chars().count());
        if rows == 0 || columns == 0 {
            return Err(GridError::Empty);
        }

        let lattice = Lattice {
            granularity,
            offset: Position::default(),
            columns,
            rows,
        };
        let mut cells = vec![Cell::Free; lattice.len()];
        let mut start = None;

        for (shape, layer) in AgentShape::iter().zip(&layers) {
            if layer.len() != rows {
                return Err(GridError::RowCount {
                    layer: shape.index(),
                    expected: rows,
                    found: layer.len(),
                });
            }
            for (y, line) in layer.iter().enumerate() {
                let found = line.chars().count();
                if found != columns {
                    return Err(GridError::RaggedRow {
                        layer: shape.index(),
                        row: y,
                        expected: columns,
                        found,
                    });
                }
                for (x, c) in line.chars().enumerate() {
                    let index = GridIndex::new(x, y, *shape);
                    let cell = Cell::try_from(c)?;
                    if cell == Cell::Start && start.replace(index).is_some() {
                        return Err(GridError::MultipleStarts);
                    }
                    cells[lattice.flat(index)] = cell;
                }
            }
        }

        let start = start.ok_or(GridError::MissingStart)?;
        Ok(Grid::from_cells(lattice, cells, start))
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Number of columns, rows and shapes.
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.lattice.columns, self.lattice.rows, AgentShape::COUNT)
    }

    pub fn start(&self) -> GridIndex {
        self.start
    }

    pub fn get(&self, index: GridIndex) -> Option<Cell> {
        self.lattice
            .contains(index)
            .then(|| self.cells[self.lattice.flat(index)])
    }

    pub fn is_wall(&self, index: GridIndex) -> bool {
        self.get(index) == Some(Cell::Wall)
    }

    pub fn is_objective(&self, index: GridIndex) -> bool {
        self.get(index) == Some(Cell::Objective)
    }

    /// Cell containing `configuration`, `None` outside the grid.
    pub fn cell_at(&self, configuration: Configuration) -> Option<(GridIndex, Cell)> {
        let index = self.lattice.config_to_index(configuration)?;
        self.get(index).map(|cell| (index, cell))
    }

    pub fn indices(&self) -> impl Iterator<Item = GridIndex> + '_ {
        self.lattice.indices()
    }

    pub fn objectives(&self) -> impl Iterator<Item = GridIndex> + '_ {
        self.indices().filter(|index| self.is_objective(*index))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// Configurations reachable in one step: a unit move along x or y keeping the shape, or a
    /// shape change in place. Steps leaving the grid or entering a wall are excluded.
    pub fn neighbors(&self, index: GridIndex) -> Vec<GridIndex> {
        let GridIndex { x, y, shape } = index;
        let moves = [
            x.checked_sub(1).map(|x| GridIndex::new(x, y, shape)),
            Some(GridIndex::new(x + 1, y, shape)),
            y.checked_sub(1).map(|y| GridIndex::new(x, y, shape)),
            Some(GridIndex::new(x, y + 1, shape)),
        ];
        let transformations = shape
            .neighbors()
            .iter()
            .map(|shape| Some(GridIndex::new(x, y, *shape)));

        moves
            .into_iter()
            .chain(transformations)
            .flatten()
            .filter(|index| matches!(self.get(*index), Some(cell) if cell != Cell::Wall))
            .collect()
    }

    /// Cells labelled differently in `other`, as `(index, own label, other label)`. A label is
    /// `None` where the index lies outside that grid, so grids of different sizes always differ.
    pub fn differences(&self, other: &Grid) -> Vec<(GridIndex, Option<Cell>, Option<Cell>)> {
        let extra = other
            .indices()
            .filter(|index| !self.lattice.contains(*index));
        self.indices()
            .chain(extra)
            .filter_map(|index| {
                let own = self.get(index);
                let theirs = other.get(index);
                (own != theirs).then_some((index, own, theirs))
            })
            .collect()
    }
}

/// One block of `rows` lines per shape layer, row 0 first, blocks separated by an empty line.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for shape in AgentShape::iter() {
            if shape.index() > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            for y in 0..self.lattice.rows {
                if y > 0 {
                    writeln!(f)?;
                }
                for x in 0..self.lattice.columns {
                    let cell = self.cells[self.lattice.flat(GridIndex::new(x, y, *shape))];
                    write!(f, "{}", cell.as_char())?;
                }
            }
        }
        Ok(())
    }
}
