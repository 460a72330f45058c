#![warn(missing_docs)]

use tracing::trace;

use super::{Cell, CellState, GridPoint, ScreenPoint};
use crate::error::GridError;

/// Maps a continuous position to the cell containing it.
///
/// The drawable area is `total_width` units wide and tall and split into
/// `rows` equal cells per axis; the cell size is `total_width / rows` rounded
/// down to a whole unit, as the drawing code uses. No bounds checking is
/// done: the caller must make sure `point` lies inside the drawable area, or
/// use [`Grid::locate`] which checks.
///
/// # Arguments
/// * `point` - Position on the drawing surface
/// * `rows` - Number of cells per axis
/// * `total_width` - Width (and height) of the drawable area
pub fn coordinate_from_point(point: ScreenPoint, rows: usize, total_width: f32) -> GridPoint {
    let gap = (total_width / rows.max(1) as f32).floor().max(1.0);
    let row = (point.y / gap).floor() as usize;
    let col = (point.x / gap).floor() as usize;
    GridPoint::new(row, col)
}

/// A square `rows x rows` grid of cells.
///
/// The grid owns every cell. Cells are created once by [`Grid::new`]; the
/// whole grid is rebuilt to reset it.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Number of cells per axis
    rows: usize,
    /// Drawn width of one cell, used only for point-to-cell mapping
    cell_width: f32,
    /// Cells in row-major order
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a new grid with every cell set to [`CellState::Empty`].
    ///
    /// # Arguments
    /// * `rows` - Number of cells per axis (the grid is `rows x rows`)
    /// * `cell_width` - Drawn width of a single cell
    ///
    /// # Returns
    /// * `Result<Self, GridError>` - The created grid or an error if parameters are invalid
    pub fn new(rows: usize, cell_width: f32) -> Result<Self, GridError> {
        if rows == 0 {
            return Err(GridError::InvalidDimensions("Row count must be non-zero"));
        }
        if !(cell_width.is_finite() && cell_width > 0.0) {
            return Err(GridError::InvalidCellWidth("Cell width must be positive and finite"));
        }
        let Some(len) = rows.checked_mul(rows) else {
            return Err(GridError::InvalidDimensions("Grid dimensions too large, would cause overflow"));
        };

        let mut cells = Vec::with_capacity(len);
        for row in 0..rows {
            for col in 0..rows {
                cells.push(Cell::new(GridPoint::new(row, col)));
            }
        }

        Ok(Grid { rows, cell_width, cells })
    }

    /// Number of cells per axis.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Drawn width of one cell.
    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Width (and height) of the whole drawable area.
    pub fn total_width(&self) -> f32 {
        self.rows as f32 * self.cell_width
    }

    /// Whether `p` addresses a cell of this grid.
    pub fn contains(&self, p: GridPoint) -> bool {
        p.row < self.rows && p.col < self.rows
    }

    fn index(&self, p: GridPoint) -> usize {
        p.row * self.rows + p.col
    }

    fn checked_index(&self, p: GridPoint) -> Result<usize, GridError> {
        if self.contains(p) {
            Ok(self.index(p))
        } else {
            Err(GridError::OutOfBounds("Grid coordinate out of bounds"))
        }
    }

    /// Gets the cell at a grid coordinate.
    ///
    /// # Returns
    /// * `Result<&Cell, GridError>` - The cell or an error if out of bounds
    pub fn cell(&self, p: GridPoint) -> Result<&Cell, GridError> {
        let index = self.checked_index(p)?;
        Ok(&self.cells[index])
    }

    /// Gets a mutable reference to the cell at a grid coordinate.
    ///
    /// # Returns
    /// * `Result<&mut Cell, GridError>` - The cell or an error if out of bounds
    pub fn cell_mut(&mut self, p: GridPoint) -> Result<&mut Cell, GridError> {
        let index = self.checked_index(p)?;
        Ok(&mut self.cells[index])
    }

    /// Gets the state tag of the cell at a grid coordinate.
    pub fn state(&self, p: GridPoint) -> Result<CellState, GridError> {
        self.cell(p).map(Cell::state)
    }

    /// Sets the state tag of the cell at a grid coordinate. Last write wins.
    pub fn set_state(&mut self, p: GridPoint, state: CellState) -> Result<(), GridError> {
        self.cell_mut(p)?.set_state(state);
        Ok(())
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Copies every state tag in row-major order.
    pub fn states(&self) -> Vec<CellState> {
        self.cells.iter().map(Cell::state).collect()
    }

    /// Counts cells currently tagged with `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state() == state).count()
    }

    /// Bounds-checked point-to-cell mapping over this grid's drawable area.
    ///
    /// Uses the grid's own `cell_width`, so fractional widths map correctly.
    ///
    /// # Returns
    /// * `Option<GridPoint>` - The cell under `point`, `None` if `point` is outside the grid
    pub fn locate(&self, point: ScreenPoint) -> Option<GridPoint> {
        let total = self.total_width();
        if !(point.x >= 0.0 && point.y >= 0.0 && point.x < total && point.y < total) {
            return None;
        }
        let row = (point.y / self.cell_width).floor() as usize;
        let col = (point.x / self.cell_width).floor() as usize;
        let p = GridPoint::new(row, col);
        self.contains(p).then_some(p)
    }

    /// Rebuilds every cell's neighbor list.
    ///
    /// A neighbor is an in-bounds, axis-aligned adjacent cell whose current
    /// state is not [`CellState::Barrier`], listed in the order down, up,
    /// right, left. Idempotent; must be called after barrier edits and
    /// before each search.
    pub fn recompute_neighbors(&mut self) {
        let rows = self.rows;
        for index in 0..self.cells.len() {
            let p = self.cells[index].point();
            let mut neighbors = Vec::with_capacity(4);
            let candidates = [
                (p.row + 1 < rows).then(|| GridPoint::new(p.row + 1, p.col)),
                (p.row > 0).then(|| GridPoint::new(p.row - 1, p.col)),
                (p.col + 1 < rows).then(|| GridPoint::new(p.row, p.col + 1)),
                (p.col > 0).then(|| GridPoint::new(p.row, p.col - 1)),
            ];
            for n in candidates.into_iter().flatten() {
                if !self.cells[self.index(n)].is_barrier() {
                    neighbors.push(n);
                }
            }
            self.cells[index].set_neighbors(neighbors);
        }
        trace!(rows, "Recomputed neighbor lists");
    }

    /// Resets `Frontier`, `Visited` and `Path` cells to `Empty`, keeping the
    /// user's start, end and barriers.
    pub fn clear_search_marks(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.state().is_search_mark() {
                cell.reset();
            }
        }
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.rows) {
            for cell in row {
                write!(f, "{}", cell.state().glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
