use std::ops::ControlFlow;

use pathlight_search::{CellState, Grid, GridPoint, Heuristic, SearchOutcome, find_path};

fn main() {
    // '#' = barrier, '.' = free
    let layout = [
        "..........",
        ".##....##.",
        "....#.....",
        "..####.#..",
        ".....#.#..",
        ".###.#.##.",
        "...#......",
        ".#.#.###..",
        ".#......#.",
        "...###....",
    ];

    let mut grid = Grid::new(layout.len(), 16.0).expect("layout is non-empty");
    for (row, line) in layout.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch == '#' {
                grid.set_state(GridPoint::new(row, col), CellState::Barrier).unwrap();
            }
        }
    }

    let start = GridPoint::new(0, 0);
    let end = GridPoint::new(9, 9);
    grid.set_state(start, CellState::Start).unwrap();
    grid.set_state(end, CellState::End).unwrap();
    grid.recompute_neighbors();

    println!("Grid:\n{}", grid);
    println!("Start: {}, End: {}", start, end);

    let mut frames = 0;
    let report = find_path(&mut grid, start, end, Heuristic::Euclidean, |_| {
        frames += 1;
        ControlFlow::Continue(())
    })
    .expect("start and end are distinct cells inside the grid");

    println!("\n{} ({} observer calls)", report, frames);
    match &report.outcome {
        SearchOutcome::Found(path) => {
            let route: Vec<String> = path.iter().map(ToString::to_string).collect();
            println!("Path: {}", route.join(" -> "));
            println!("\nGrid after search (o = frontier, x = visited, * = path):\n{}", grid);
        }
        SearchOutcome::Exhausted => println!("\nNo path found."),
        SearchOutcome::Cancelled => println!("\nSearch was cancelled."),
    }
}
