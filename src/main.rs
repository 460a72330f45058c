mod blackboard; // shared run status and cancel flag
mod bus; // grid frames from the search worker to the renderer
mod graphics; // macroquad drawing
mod runner; // search worker thread
mod session; // grid ownership and user edits
mod settings; // config/default.toml + PATHLIGHT_* overrides

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use blackboard::{Blackboard, request_cancel, snapshot};
use bus::{Frame, Topic};
use macroquad::prelude::*;
use pathlight_search::{CellState, ScreenPoint};
use runner::SearchHandle;
use session::Session;
use settings::Settings;
use tracing::{error, info, trace, warn};
use tracing_subscriber::EnvFilter;

/// Frames buffered between the worker and the renderer; older ones are skipped.
const FRAME_CAPACITY: usize = 8;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let settings = settings::load_settings().context("Failed to load settings")?;
    info!(rows = settings.rows, heuristic = %settings.heuristic, "Pathlight starting");

    macroquad::Window::from_config(graphics::window_conf(&settings), async move {
        match run(settings).await {
            Ok(()) => info!("Pathlight exited."),
            Err(e) => error!("Pathlight stopped: {:?}", e),
        }
    });
    Ok(())
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    prevent_quit();

    let mut session = Session::new(settings.rows, settings.cell_width()).context("Failed to build grid")?;
    let board: Blackboard = Arc::default();
    let frames: Topic<Frame> = Topic::new(FRAME_CAPACITY);
    let mut frame_rx = frames.subscribe();
    let mut running: Option<SearchHandle> = None;
    let mut shown: Option<Arc<Frame>> = None;

    loop {
        if let Some(handle) = running.take_if(|h| h.is_finished()) {
            collect(handle, &mut session);
            bus::latest(&mut frame_rx);
            shown = None;
        }

        if is_quit_requested() || is_key_pressed(KeyCode::Escape) {
            if let Some(handle) = running.take() {
                info!("Quit requested while searching; cancelling.");
                request_cancel(&board);
                collect(handle, &mut session);
            }
            break;
        }

        if running.is_some() {
            if let Some(frame) = bus::latest(&mut frame_rx) {
                trace!(step = frame.step, "Showing search frame");
                shown = Some(frame);
            }
        } else {
            running = handle_input(&mut session, &settings, &board, &frames)?;
        }

        match &shown {
            Some(frame) => graphics::draw_cells(&frame.states, frame.rows, settings.cell_width()),
            None => graphics::draw_cells(&session.grid().states(), settings.rows, settings.cell_width()),
        }
        graphics::draw_status(&snapshot(&board));

        next_frame().await
    }

    Ok(())
}

/// Applies pointer and keyboard input while no search is running. Returns the
/// handle of a search started by this frame's input.
fn handle_input(
    session: &mut Session,
    settings: &Settings,
    board: &Blackboard,
    frames: &Topic<Frame>,
) -> anyhow::Result<Option<SearchHandle>> {
    let (x, y) = mouse_position();
    let pointer = session.grid().locate(ScreenPoint::new(x, y));

    if let Some(p) = pointer {
        if is_mouse_button_down(MouseButton::Left) {
            session.primary_click(p)?;
        } else if is_mouse_button_down(MouseButton::Right) {
            session.secondary_click(p)?;
        }
    }

    if is_key_pressed(KeyCode::C) {
        session.clear()?;
    }

    if is_key_pressed(KeyCode::Space) {
        let delay = Duration::from_millis(settings.step_delay_ms);
        match session.prepare_search(settings.heuristic, delay) {
            Some(job) => {
                info!(barriers = session.count(CellState::Barrier), "Search requested");
                return Ok(Some(runner::spawn_search(job, Arc::clone(board), frames.clone())?));
            }
            None => warn!(
                start = ?session.start(),
                end = ?session.end(),
                "Place a start and an end cell before searching."
            ),
        }
    }

    Ok(None)
}

/// Joins a finished (or cancelled) worker and shows its grid.
fn collect(handle: SearchHandle, session: &mut Session) {
    match handle.join() {
        Ok(Ok((grid, _))) => session.finish_search(grid),
        Ok(Err(e)) => error!("Search could not run: {}", e),
        Err(_) => error!("Search thread panicked."),
    }
}
