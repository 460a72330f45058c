//! Grid model for the search engine.
//!
//! This module provides the cell and grid types plus the coordinate types
//! used to address them.

pub mod cell;
pub mod grid;
pub mod point_types;

pub use cell::{Cell, CellState};
pub use grid::{Grid, coordinate_from_point};
pub use point_types::{GridPoint, ScreenPoint};
