//! Observable A* search over a uniform square grid.
//!
//! The crate is split the way the search is consumed:
//!
//! - [`map`]: cells, their state tags and the grid that owns them
//! - [`heuristic`]: admissible remaining-cost estimates
//! - [`astar`]: the search engine, which reports progress to an observer
//!   after every step so a caller can render the search as it unfolds
//!
//! The engine knows nothing about rendering. An observer receives the grid,
//! reads cell states, and decides whether the search should continue.
//!
//! ```
//! use std::ops::ControlFlow;
//! use pathlight_search::{find_path, CellState, Grid, GridPoint, Heuristic};
//!
//! let mut grid = Grid::new(5, 16.0).unwrap();
//! let (start, end) = (GridPoint::new(0, 0), GridPoint::new(4, 4));
//! grid.set_state(start, CellState::Start).unwrap();
//! grid.set_state(end, CellState::End).unwrap();
//! grid.recompute_neighbors();
//!
//! let report = find_path(&mut grid, start, end, Heuristic::Euclidean, |_| ControlFlow::Continue(())).unwrap();
//! assert_eq!(report.path_length(), 8);
//! ```

pub mod astar;
pub mod error;
pub mod heuristic;
pub mod map;

pub use astar::{SearchOutcome, SearchReport, find_path, reconstruct_path};
pub use error::GridError;
pub use heuristic::{Heuristic, euclidean, manhattan};
pub use map::{Cell, CellState, Grid, GridPoint, ScreenPoint, coordinate_from_point};
