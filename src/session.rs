use std::time::Duration;

use pathlight_search::{CellState, Grid, GridError, GridPoint, Heuristic};
use tracing::{debug, info};

use crate::runner::SearchJob;

/// What a pointer edit did to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    PlacedStart,
    PlacedEnd,
    PlacedBarrier,
    Erased,
    Ignored,
}

/// Owns the grid between searches and applies user edits to it.
///
/// Keeps at most one start and one end cell: the first primary click places
/// the start, the second the end, every later one a barrier.
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    start: Option<GridPoint>,
    end: Option<GridPoint>,
}

impl Session {
    pub fn new(rows: usize, cell_width: f32) -> Result<Self, GridError> {
        Ok(Session { grid: Grid::new(rows, cell_width)?, start: None, end: None })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Option<GridPoint> {
        self.start
    }

    pub fn end(&self) -> Option<GridPoint> {
        self.end
    }

    pub fn primary_click(&mut self, p: GridPoint) -> Result<Edit, GridError> {
        let cell = self.grid.cell_mut(p)?;
        let edit = if self.start.is_none() && self.end != Some(p) {
            cell.make_start();
            self.start = Some(p);
            Edit::PlacedStart
        } else if self.end.is_none() && self.start != Some(p) {
            cell.make_end();
            self.end = Some(p);
            Edit::PlacedEnd
        } else if self.start != Some(p) && self.end != Some(p) && !cell.is_barrier() {
            cell.make_barrier();
            Edit::PlacedBarrier
        } else {
            Edit::Ignored
        };
        if edit != Edit::Ignored {
            debug!(cell = %p, ?edit, "Grid edited");
        }
        Ok(edit)
    }

    pub fn secondary_click(&mut self, p: GridPoint) -> Result<Edit, GridError> {
        let cell = self.grid.cell_mut(p)?;
        if cell.is_empty() {
            return Ok(Edit::Ignored);
        }
        cell.reset();
        if self.start == Some(p) {
            self.start = None;
        } else if self.end == Some(p) {
            self.end = None;
        }
        debug!(cell = %p, "Cell erased");
        Ok(Edit::Erased)
    }

    /// Rebuilds the grid from scratch, dropping start, end and barriers.
    pub fn clear(&mut self) -> Result<(), GridError> {
        self.grid = Grid::new(self.grid.rows(), self.grid.cell_width())?;
        self.start = None;
        self.end = None;
        info!("Grid cleared");
        Ok(())
    }

    /// Readies the grid for a search and hands a copy of it to the caller.
    ///
    /// Marks from the previous search are wiped and neighbor lists are
    /// recomputed so they reflect the current barriers. Returns `None` until
    /// both a start and an end are placed.
    pub fn prepare_search(&mut self, heuristic: Heuristic, step_delay: Duration) -> Option<SearchJob> {
        let (start, end) = (self.start?, self.end?);
        self.grid.clear_search_marks();
        self.grid.recompute_neighbors();
        Some(SearchJob { grid: self.grid.clone(), start, end, heuristic, step_delay })
    }

    /// Takes back the grid a finished search worked on.
    pub fn finish_search(&mut self, grid: Grid) {
        debug_assert_eq!(grid.rows(), self.grid.rows());
        self.grid = grid;
    }

    /// Number of cells currently tagged `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.grid.count(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> GridPoint {
        GridPoint::new(row, col)
    }

    #[test]
    fn test_clicks_place_start_end_then_barriers() {
        let mut session = Session::new(5, 16.0).unwrap();
        assert_eq!(session.primary_click(p(0, 0)).unwrap(), Edit::PlacedStart);
        assert_eq!(session.primary_click(p(0, 0)).unwrap(), Edit::Ignored);
        assert_eq!(session.primary_click(p(4, 4)).unwrap(), Edit::PlacedEnd);
        assert_eq!(session.primary_click(p(2, 2)).unwrap(), Edit::PlacedBarrier);
        assert_eq!(session.primary_click(p(2, 2)).unwrap(), Edit::Ignored);
        assert_eq!(session.primary_click(p(4, 4)).unwrap(), Edit::Ignored);

        assert_eq!(session.start(), Some(p(0, 0)));
        assert_eq!(session.end(), Some(p(4, 4)));
        assert_eq!(session.count(CellState::Start), 1);
        assert_eq!(session.count(CellState::End), 1);
        assert_eq!(session.count(CellState::Barrier), 1);
    }

    #[test]
    fn test_erasing_start_frees_the_slot() {
        let mut session = Session::new(5, 16.0).unwrap();
        session.primary_click(p(0, 0)).unwrap();
        session.primary_click(p(1, 1)).unwrap();

        assert_eq!(session.secondary_click(p(0, 0)).unwrap(), Edit::Erased);
        assert_eq!(session.start(), None);
        assert_eq!(session.secondary_click(p(0, 0)).unwrap(), Edit::Ignored);

        // The next primary click places a new start, not a barrier.
        assert_eq!(session.primary_click(p(3, 3)).unwrap(), Edit::PlacedStart);
        assert_eq!(session.count(CellState::Start), 1);
        assert_eq!(session.count(CellState::End), 1);
    }

    #[test]
    fn test_clicking_end_without_start_does_nothing() {
        let mut session = Session::new(5, 16.0).unwrap();
        session.primary_click(p(0, 0)).unwrap();
        session.primary_click(p(1, 1)).unwrap();
        session.secondary_click(p(0, 0)).unwrap();

        assert_eq!(session.primary_click(p(1, 1)).unwrap(), Edit::Ignored);
        assert_eq!(session.end(), Some(p(1, 1)));
        assert_eq!(session.start(), None);
    }

    #[test]
    fn test_out_of_bounds_click() {
        let mut session = Session::new(3, 16.0).unwrap();
        assert!(matches!(session.primary_click(p(3, 0)), Err(GridError::OutOfBounds(_))));
        assert!(matches!(session.secondary_click(p(0, 3)), Err(GridError::OutOfBounds(_))));
    }

    #[test]
    fn test_prepare_search_needs_both_endpoints() {
        let mut session = Session::new(5, 16.0).unwrap();
        assert!(session.prepare_search(Heuristic::Euclidean, Duration::ZERO).is_none());
        session.primary_click(p(0, 0)).unwrap();
        assert!(session.prepare_search(Heuristic::Euclidean, Duration::ZERO).is_none());
        session.primary_click(p(0, 4)).unwrap();

        let job = session.prepare_search(Heuristic::Manhattan, Duration::from_millis(3)).unwrap();
        assert_eq!((job.start, job.end), (p(0, 0), p(0, 4)));
        assert_eq!(job.heuristic, Heuristic::Manhattan);
        assert_eq!(job.step_delay, Duration::from_millis(3));
        assert!(!job.grid.cell(p(0, 0)).unwrap().neighbors().is_empty());
    }

    #[test]
    fn test_prepare_search_sees_latest_barriers_and_clears_old_marks() {
        let mut session = Session::new(3, 16.0).unwrap();
        session.primary_click(p(0, 0)).unwrap();
        session.primary_click(p(2, 2)).unwrap();
        let first = session.prepare_search(Heuristic::Euclidean, Duration::ZERO).unwrap();

        let mut searched = first.grid;
        searched.set_state(p(1, 1), CellState::Visited).unwrap();
        session.finish_search(searched);
        session.primary_click(p(1, 0)).unwrap();

        let second = session.prepare_search(Heuristic::Euclidean, Duration::ZERO).unwrap();
        assert_eq!(second.grid.count(CellState::Visited), 0);
        assert_eq!(second.grid.cell(p(0, 0)).unwrap().neighbors(), &[p(0, 1)]);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = Session::new(4, 16.0).unwrap();
        session.primary_click(p(0, 0)).unwrap();
        session.primary_click(p(3, 3)).unwrap();
        session.primary_click(p(1, 1)).unwrap();

        session.clear().unwrap();
        assert_eq!(session.start(), None);
        assert_eq!(session.end(), None);
        assert_eq!(session.count(CellState::Empty), 16);
        assert_eq!(session.grid().cell_width(), 16.0);
    }
}
