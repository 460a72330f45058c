/*

A* = f(n) = g(n) + h(n)

    g(n) = cost of the best known route from start to n (one per step)
    h(n) = heuristic estimate from n to the end cell
    f(n) = priority of n in the open set

Ties on f are broken by insertion order (earlier push wins), so two runs on
the same grid expand cells in exactly the same order.

The observer is called once before every expansion and once per revealed
path cell. It sees the grid as it is at that moment and may stop the search.

*/

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;
use std::ops::ControlFlow;

use tracing::{debug, trace};

use crate::error::GridError;
use crate::heuristic::Heuristic;
use crate::map::{Grid, GridPoint};

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The end cell was reached. Holds the path from the first step after
    /// start up to and including end.
    Found(Vec<GridPoint>),
    /// The open set ran dry: no route exists with the current barriers.
    Exhausted,
    /// The observer asked the search to stop.
    Cancelled,
}

/// Result of a [`find_path`] call with search metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// How the search ended.
    pub outcome: SearchOutcome,
    /// Number of cells popped from the open set.
    pub nodes_expanded: usize,
    /// Number of times the observer was called.
    pub steps: usize,
}

impl SearchReport {
    /// Returns true if a path was found.
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Found(_))
    }

    /// Returns true if the observer stopped the search.
    pub fn is_cancelled(&self) -> bool {
        self.outcome == SearchOutcome::Cancelled
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&[GridPoint]> {
        match &self.outcome {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    /// Number of moves in the path, 0 when no path was found.
    pub fn path_length(&self) -> usize {
        self.path().map_or(0, <[GridPoint]>::len)
    }

    /// Returns the path if one was found.
    pub fn into_path(self) -> Option<Vec<GridPoint>> {
        match self.outcome {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self.outcome {
            SearchOutcome::Found(_) => "found",
            SearchOutcome::Exhausted => "exhausted",
            SearchOutcome::Cancelled => "cancelled",
        };
        write!(
            f,
            "SearchReport {{ outcome: {}, path_length: {}, nodes_expanded: {}, steps: {} }}",
            status,
            self.path_length(),
            self.nodes_expanded,
            self.steps
        )
    }
}

/// Open-set entry keyed on `(f, seq)`.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f64,
    seq: u64,
    point: GridPoint,
}

// BinaryHeap is a max-heap: both keys are flipped so the smallest f, then
// the earliest push, comes out first.
impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

/// Walks `came_from` back from `end` and returns the route in travel order.
///
/// The start cell has no `came_from` entry, so it is not part of the result.
/// Pure: calling it twice on the same map yields the same sequence.
pub fn reconstruct_path(came_from: &HashMap<GridPoint, GridPoint>, end: GridPoint) -> Vec<GridPoint> {
    let mut path = Vec::new();
    let mut current = end;
    while let Some(&previous) = came_from.get(&current) {
        path.push(current);
        current = previous;
    }
    path.reverse();
    path
}

/// Finds a shortest path from `start` to `end` with A*, reporting progress to
/// `on_step`.
///
/// The grid's neighbor lists must be fresh, i.e. [`Grid::recompute_neighbors`]
/// was called after the last barrier edit. The engine marks discovered cells
/// `Frontier`, expanded cells `Visited` and, on success, the route `Path`
/// (re-marking `end` as `End` last). `Start`, `End` and `Path` cells are never
/// overwritten with `Frontier` or `Visited`.
///
/// `on_step` runs once before each expansion and once per revealed path cell;
/// returning `ControlFlow::Break(())` stops the search immediately with
/// [`SearchOutcome::Cancelled`].
///
/// # Arguments
/// * `grid` - The grid to search; its cell states are updated as the search runs.
/// * `start` - Starting cell.
/// * `end` - Target cell, distinct from `start`.
/// * `heuristic` - Remaining-cost estimate used for the open-set priority.
/// * `on_step` - Observer called with the current grid.
///
/// # Returns
/// * `Result<SearchReport, GridError>` - The search report, or an error if
///   `start` or `end` is outside the grid or they are the same cell.
pub fn find_path<F>(
    grid: &mut Grid,
    start: GridPoint,
    end: GridPoint,
    heuristic: Heuristic,
    mut on_step: F,
) -> Result<SearchReport, GridError>
where
    F: FnMut(&Grid) -> ControlFlow<()>,
{
    grid.cell(start)?;
    grid.cell(end)?;
    if start == end {
        return Err(GridError::DegenerateQuery("Start and end must be different cells"));
    }

    debug!(%start, %end, %heuristic, rows = grid.rows(), "Starting A* search");

    let mut nodes_expanded = 0;
    let mut steps = 0;
    let report = |outcome: SearchOutcome,
                  nodes_expanded: usize,
                  steps: usize|
     -> Result<SearchReport, GridError> {
        debug!(nodes_expanded, steps, ?outcome, "A* search finished");
        Ok(SearchReport { outcome, nodes_expanded, steps })
    };

    // A cell has at most one heap entry, and is in `open_members` while it does.
    let mut open_set: BinaryHeap<OpenEntry> = BinaryHeap::new();
    let mut open_members: HashSet<GridPoint> = HashSet::new();
    let mut closed: HashSet<GridPoint> = HashSet::new();
    let mut came_from: HashMap<GridPoint, GridPoint> = HashMap::new();
    let mut g_score: HashMap<GridPoint, u32> = HashMap::new();
    let mut f_score: HashMap<GridPoint, f64> = HashMap::new();
    let mut seq: u64 = 0;

    g_score.insert(start, 0);
    f_score.insert(start, heuristic.estimate(start, end));
    open_set.push(OpenEntry { f: f_score[&start], seq, point: start });
    open_members.insert(start);

    while !open_set.is_empty() {
        steps += 1;
        if on_step(&*grid).is_break() {
            return report(SearchOutcome::Cancelled, nodes_expanded, steps);
        }

        let Some(OpenEntry { point: current, .. }) = open_set.pop() else {
            break;
        };
        open_members.remove(&current);
        nodes_expanded += 1;
        trace!(%current, g = g_score[&current], f = f_score[&current], "Expanding cell");

        if current == end {
            let path = reconstruct_path(&came_from, end);
            for &p in &path {
                grid.cell_mut(p)?.make_path();
                steps += 1;
                if on_step(&*grid).is_break() {
                    return report(SearchOutcome::Cancelled, nodes_expanded, steps);
                }
            }
            grid.cell_mut(end)?.make_end();
            return report(SearchOutcome::Found(path), nodes_expanded, steps);
        }

        let current_g = g_score[&current];
        let neighbors = grid.cell(current)?.neighbors().to_vec();
        for neighbor in neighbors {
            if closed.contains(&neighbor) {
                continue;
            }
            let tentative_g = current_g + 1; // Unit cost between adjacent cells

            if tentative_g < *g_score.get(&neighbor).unwrap_or(&u32::MAX) {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative_g);
                let f = f64::from(tentative_g) + heuristic.estimate(neighbor, end);
                f_score.insert(neighbor, f);

                // A pending cell keeps the priority it was pushed with.
                if open_members.insert(neighbor) {
                    seq += 1;
                    open_set.push(OpenEntry { f, seq, point: neighbor });
                    let cell = grid.cell_mut(neighbor)?;
                    if !cell.state().is_landmark() {
                        cell.make_frontier();
                    }
                }
            }
        }

        closed.insert(current);
        if current != start {
            let cell = grid.cell_mut(current)?;
            if !cell.state().is_landmark() {
                cell.make_visited();
            }
        }
    }

    report(SearchOutcome::Exhausted, nodes_expanded, steps)
}
