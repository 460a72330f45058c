//! Remaining-cost estimates between grid coordinates.
//!
//! Both estimates are admissible and consistent for unit-cost, 4-way moves:
//! neither ever exceeds the Manhattan distance, which is the true cost on an
//! empty grid.

use crate::map::GridPoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Euclidean (L2) distance between two grid points.
pub fn euclidean(a: GridPoint, b: GridPoint) -> f64 {
    let dr = a.row.abs_diff(b.row) as f64;
    let dc = a.col.abs_diff(b.col) as f64;
    (dr * dr + dc * dc).sqrt()
}

/// Manhattan (L1) distance between two grid points.
pub fn manhattan(a: GridPoint, b: GridPoint) -> f64 {
    (a.row.abs_diff(b.row) + a.col.abs_diff(b.col)) as f64
}

/// Selects the estimate used to order the open set.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heuristic {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Axis-aligned step count; exact on an empty grid.
    Manhattan,
}

impl Heuristic {
    /// Estimated remaining cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: GridPoint, to: GridPoint) -> f64 {
        match self {
            Heuristic::Euclidean => euclidean(from, to),
            Heuristic::Manhattan => manhattan(from, to),
        }
    }
}

impl core::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Heuristic::Euclidean => write!(f, "euclidean"),
            Heuristic::Manhattan => write!(f, "manhattan"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance() {
        let a = GridPoint::new(0, 0);
        let b = GridPoint::new(3, 4);
        assert_eq!(euclidean(a, b), 5.0);
        assert_eq!(euclidean(b, a), 5.0);
        assert_eq!(euclidean(a, a), 0.0);
    }

    #[test]
    fn test_manhattan_distance() {
        let a = GridPoint::new(1, 5);
        let b = GridPoint::new(4, 1);
        assert_eq!(manhattan(a, b), 7.0);
    }

    #[test]
    fn test_estimates_never_exceed_step_count() {
        for r in 0..8 {
            for c in 0..8 {
                let a = GridPoint::new(r, c);
                let b = GridPoint::new(7 - c, r);
                let steps = manhattan(a, b);
                assert!(Heuristic::Euclidean.estimate(a, b) <= steps);
                assert!(Heuristic::Manhattan.estimate(a, b) <= steps);
            }
        }
    }

    #[test]
    fn test_euclidean_is_consistent_for_unit_moves() {
        // h(a) <= 1 + h(b) for every adjacent pair.
        let goal = GridPoint::new(6, 2);
        for r in 0..8 {
            for c in 0..7 {
                let a = GridPoint::new(r, c);
                let b = GridPoint::new(r, c + 1);
                assert!(euclidean(a, goal) <= 1.0 + euclidean(b, goal) + 1e-12);
                assert!(euclidean(b, goal) <= 1.0 + euclidean(a, goal) + 1e-12);
            }
        }
    }

    #[test]
    fn test_default_is_euclidean() {
        assert_eq!(Heuristic::default(), Heuristic::Euclidean);
        assert_eq!(Heuristic::Manhattan.to_string(), "manhattan");
    }
}
