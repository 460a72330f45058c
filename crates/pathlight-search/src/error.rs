//! This module defines the error types used by the `pathlight-search` crate.

#![warn(missing_docs)]

/// Error type for grid and search operations.
///
/// "No path exists" is not an error: it is reported through
/// [`SearchOutcome::Exhausted`](crate::astar::SearchOutcome::Exhausted).
/// These variants cover malformed grids and queries only.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Error for invalid grid dimensions.
    /// This variant is returned when the row count is zero or too large to allocate.
    InvalidDimensions(&'static str),
    /// Error for an invalid cell width.
    /// This variant is returned when the cell width is not a positive, finite number.
    InvalidCellWidth(&'static str),
    /// Error for out-of-bounds access.
    /// This variant is returned when addressing a cell outside the grid.
    OutOfBounds(&'static str),
    /// Error for a search whose start and end are the same cell.
    DegenerateQuery(&'static str),
}

impl core::fmt::Display for GridError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GridError::InvalidDimensions(msg) => write!(f, "Invalid grid dimensions: {}", msg),
            GridError::InvalidCellWidth(msg) => write!(f, "Invalid cell width: {}", msg),
            GridError::OutOfBounds(msg) => write!(f, "Grid access out of bounds: {}", msg),
            GridError::DegenerateQuery(msg) => write!(f, "Degenerate search query: {}", msg),
        }
    }
}

impl core::error::Error for GridError {}
