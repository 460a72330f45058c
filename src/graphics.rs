use macroquad::prelude::*;
use pathlight_search::CellState;

use crate::blackboard::{RunBoard, RunStatus};
use crate::settings::Settings;

const EMPTY: Color = WHITE;
const BARRIER: Color = BLACK;
const START: Color = Color::new(249.0 / 255.0, 245.0 / 255.0, 75.0 / 255.0, 1.0);
const END: Color = Color::new(100.0 / 255.0, 13.0 / 255.0, 107.0 / 255.0, 1.0);
const FRONTIER: Color = Color::new(161.0 / 255.0, 221.0 / 255.0, 112.0 / 255.0, 1.0);
const VISITED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
const PATH: Color = Color::new(65.0 / 255.0, 201.0 / 255.0, 226.0 / 255.0, 1.0);
const GRID_LINE: Color = Color::new(199.0 / 255.0, 183.0 / 255.0, 163.0 / 255.0, 1.0);

// Function to configure the macroquad window
pub fn window_conf(settings: &Settings) -> Conf {
    let side = settings.window_width as i32;
    Conf {
        window_title: "A* Path Finding Algorithm".to_string(),
        window_width: side,
        window_height: side,
        window_resizable: false,
        ..Default::default()
    }
}

/// Colour projection of a cell state. Rendering never feeds back into state.
pub fn state_color(state: CellState) -> Color {
    match state {
        CellState::Empty => EMPTY,
        CellState::Barrier => BARRIER,
        CellState::Start => START,
        CellState::End => END,
        CellState::Frontier => FRONTIER,
        CellState::Visited => VISITED,
        CellState::Path => PATH,
    }
}

/// Draws row-major `states` of a `rows x rows` grid, then the grid lines.
pub fn draw_cells(states: &[CellState], rows: usize, cell_width: f32) {
    clear_background(EMPTY);

    for (i, state) in states.iter().enumerate() {
        if *state == CellState::Empty {
            continue;
        }
        let (row, col) = (i / rows, i % rows);
        draw_rectangle(col as f32 * cell_width, row as f32 * cell_width, cell_width, cell_width, state_color(*state));
    }

    let side = rows as f32 * cell_width;
    for i in 0..=rows {
        let offset = i as f32 * cell_width;
        draw_line(0.0, offset, side, offset, 1.0, GRID_LINE);
        draw_line(offset, 0.0, offset, side, 1.0, GRID_LINE);
    }
}

/// One-line status overlay in the bottom-left corner.
pub fn draw_status(board: &RunBoard) {
    let text = match (&board.status, &board.last_report) {
        (RunStatus::Searching, _) if board.cancel_requested => "Stopping search...".to_string(),
        (RunStatus::Searching, _) => format!("Searching... step {}", board.steps),
        (RunStatus::Idle, Some(report)) => format!(
            "Last search: {} cells expanded, path length {}",
            report.nodes_expanded,
            report.path_length()
        ),
        (RunStatus::Idle, None) => "Click: start, end, barriers | Right click: erase | Space: search | C: clear".to_string(),
    };

    let y = screen_height() - 8.0;
    let dims = measure_text(&text, None, 18, 1.0);
    draw_rectangle(4.0, y - dims.offset_y - 4.0, dims.width + 8.0, dims.height + 8.0, Color::new(1.0, 1.0, 1.0, 0.85));
    draw_text(&text, 8.0, y, 18.0, BLACK);
}
