//! A single addressable grid cell and its state tag.

use core::fmt;

use super::GridPoint;

/// What a cell currently represents.
///
/// The tag is the source of truth for every consumer; colours or glyphs are a
/// projection of it computed by whoever renders the grid.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Free space that has not been touched by a search.
    #[default]
    Empty,
    /// Impassable cell.
    Barrier,
    /// The search origin.
    Start,
    /// The search target.
    End,
    /// Discovered by the search and waiting to be expanded (open set).
    Frontier,
    /// Expanded by the search; its cost is final (closed set).
    Visited,
    /// Part of the reconstructed shortest path.
    Path,
}

impl CellState {
    /// Landmark states are never overwritten with `Frontier` or `Visited`
    /// by the search engine.
    pub fn is_landmark(self) -> bool {
        matches!(self, CellState::Start | CellState::End | CellState::Path)
    }

    /// Whether the state was written by a search rather than by the user.
    pub fn is_search_mark(self) -> bool {
        matches!(self, CellState::Frontier | CellState::Visited | CellState::Path)
    }

    /// Single character used by the text rendering of a grid.
    pub fn glyph(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Barrier => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Frontier => 'o',
            CellState::Visited => 'x',
            CellState::Path => '*',
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellState::Empty => write!(f, "Empty"),
            CellState::Barrier => write!(f, "Barrier"),
            CellState::Start => write!(f, "Start"),
            CellState::End => write!(f, "End"),
            CellState::Frontier => write!(f, "Frontier"),
            CellState::Visited => write!(f, "Visited"),
            CellState::Path => write!(f, "Path"),
        }
    }
}

/// One grid cell: a fixed coordinate, a mutable state tag and a cached list
/// of passable neighbors.
///
/// The neighbor list is only refreshed by
/// [`Grid::recompute_neighbors`](super::Grid::recompute_neighbors); editing a
/// barrier afterwards leaves adjacent lists stale until the next recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    point: GridPoint,
    state: CellState,
    neighbors: Vec<GridPoint>,
}

impl Cell {
    pub(crate) fn new(point: GridPoint) -> Self {
        Self {
            point,
            state: CellState::Empty,
            neighbors: Vec::with_capacity(4),
        }
    }

    /// The cell's coordinate.
    pub fn point(&self) -> GridPoint {
        self.point
    }

    /// The cell's current state tag.
    pub fn state(&self) -> CellState {
        self.state
    }

    /// Passable neighbors as of the last neighbor recompute.
    pub fn neighbors(&self) -> &[GridPoint] {
        &self.neighbors
    }

    pub(crate) fn set_neighbors(&mut self, neighbors: Vec<GridPoint>) {
        self.neighbors = neighbors;
    }

    pub fn is_empty(&self) -> bool {
        self.state == CellState::Empty
    }

    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }

    pub fn is_start(&self) -> bool {
        self.state == CellState::Start
    }

    pub fn is_end(&self) -> bool {
        self.state == CellState::End
    }

    pub fn is_frontier(&self) -> bool {
        self.state == CellState::Frontier
    }

    pub fn is_visited(&self) -> bool {
        self.state == CellState::Visited
    }

    pub fn is_path(&self) -> bool {
        self.state == CellState::Path
    }

    /// Overwrite the state tag. Last write wins.
    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    pub fn reset(&mut self) {
        self.state = CellState::Empty;
    }

    pub fn make_start(&mut self) {
        self.state = CellState::Start;
    }

    pub fn make_end(&mut self) {
        self.state = CellState::End;
    }

    pub fn make_barrier(&mut self) {
        self.state = CellState::Barrier;
    }

    pub fn make_frontier(&mut self) {
        self.state = CellState::Frontier;
    }

    pub fn make_visited(&mut self) {
        self.state = CellState::Visited;
    }

    pub fn make_path(&mut self) {
        self.state = CellState::Path;
    }
}
