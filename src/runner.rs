use std::ops::ControlFlow;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::Context;
use pathlight_search::{Grid, GridError, GridPoint, Heuristic, SearchReport, find_path};
use spin_sleep::SpinSleeper;
use tracing::{error, info};

use crate::blackboard::{self, Blackboard};
use crate::bus::{Frame, Topic};

/// Everything a worker needs to run one search on its own copy of the grid.
#[derive(Debug, Clone)]
pub struct SearchJob {
    pub grid: Grid,
    pub start: GridPoint,
    pub end: GridPoint,
    pub heuristic: Heuristic,
    pub step_delay: Duration,
}

pub type SearchHandle = JoinHandle<Result<(Grid, SearchReport), GridError>>;

/// Runs `job` on the calling thread.
///
/// Every observer call publishes a [`Frame`], records progress on the
/// blackboard and checks for a cancel request, then sleeps for the step delay.
/// Returns the searched grid so the caller can show the final state.
pub fn run_search(
    job: SearchJob,
    bb: &Blackboard,
    frames: &Topic<Frame>,
) -> Result<(Grid, SearchReport), GridError> {
    let SearchJob { mut grid, start, end, heuristic, step_delay } = job;
    let sleeper = SpinSleeper::new(1_000);
    let mut step = 0;

    let result = find_path(&mut grid, start, end, heuristic, |g| {
        step += 1;
        frames.publish(Frame::capture(g, step));
        blackboard::record_step(bb, step);
        if blackboard::cancel_requested(bb) {
            return ControlFlow::Break(());
        }
        if !step_delay.is_zero() {
            sleeper.sleep(step_delay);
        }
        ControlFlow::Continue(())
    });

    match result {
        Ok(report) => {
            info!(%report, "Search finished");
            blackboard::finish_run(bb, Some(report.clone()));
            Ok((grid, report))
        }
        Err(e) => {
            error!("Search rejected: {}", e);
            blackboard::finish_run(bb, None);
            Err(e)
        }
    }
}

/// Starts `job` on a dedicated "search" thread.
pub fn spawn_search(job: SearchJob, bb: Blackboard, frames: Topic<Frame>) -> anyhow::Result<SearchHandle> {
    blackboard::begin_run(&bb);
    info!(start = %job.start, end = %job.end, heuristic = %job.heuristic, "Spawning search thread...");

    let worker_bb = Arc::clone(&bb);
    std::thread::Builder::new()
        .name("search".into())
        .spawn(move || run_search(job, &worker_bb, &frames))
        .inspect_err(|_| blackboard::finish_run(&bb, None))
        .context("Failed to spawn search thread")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackboard::RunStatus;
    use crate::bus;
    use pathlight_search::{CellState, SearchOutcome};

    fn job(rows: usize, start: GridPoint, end: GridPoint) -> SearchJob {
        let mut grid = Grid::new(rows, 10.0).unwrap();
        grid.set_state(start, CellState::Start).unwrap();
        grid.set_state(end, CellState::End).unwrap();
        grid.recompute_neighbors();
        SearchJob { grid, start, end, heuristic: Heuristic::Euclidean, step_delay: Duration::ZERO }
    }

    #[test]
    fn test_run_search_publishes_every_step() {
        let bb: Blackboard = Arc::default();
        let frames: Topic<Frame> = Topic::new(256);
        let mut rx = frames.subscribe();

        blackboard::begin_run(&bb);
        let (grid, report) = run_search(job(4, GridPoint::new(0, 0), GridPoint::new(3, 3)), &bb, &frames).unwrap();

        assert_eq!(report.path_length(), 6);
        assert_eq!(grid.state(GridPoint::new(3, 3)).unwrap(), CellState::End);

        let mut received = 0;
        while rx.try_recv().is_ok() {
            received += 1;
        }
        assert_eq!(received, report.steps);

        let board = blackboard::snapshot(&bb);
        assert_eq!(board.status, RunStatus::Idle);
        assert_eq!(board.steps, report.steps);
        assert_eq!(board.last_report, Some(report));
    }

    #[test]
    fn test_cancel_request_stops_search() {
        let bb: Blackboard = Arc::default();
        let frames: Topic<Frame> = Topic::new(4);

        blackboard::begin_run(&bb);
        blackboard::request_cancel(&bb);
        let (grid, report) = run_search(job(6, GridPoint::new(0, 0), GridPoint::new(5, 5)), &bb, &frames).unwrap();

        assert_eq!(report.outcome, SearchOutcome::Cancelled);
        assert_eq!(report.steps, 1);
        assert_eq!(grid.count(CellState::Path), 0);
    }

    #[test]
    fn test_spawned_search_returns_grid() {
        let bb: Blackboard = Arc::default();
        let frames: Topic<Frame> = Topic::new(8);
        let mut rx = frames.subscribe();

        let handle = spawn_search(job(5, GridPoint::new(4, 0), GridPoint::new(0, 4)), bb.clone(), frames).unwrap();
        let (_, report) = handle.join().unwrap().unwrap();

        assert!(report.is_found());
        assert_eq!(report.path_length(), 8);
        let last = bus::latest(&mut rx).unwrap();
        assert_eq!(last.step, report.steps);
        assert_eq!(blackboard::snapshot(&bb).status, RunStatus::Idle);
    }

    #[test]
    fn test_rejected_job_leaves_board_idle() {
        let bb: Blackboard = Arc::default();
        let frames: Topic<Frame> = Topic::new(1);
        let p = GridPoint::new(1, 1);
        let mut bad = job(3, GridPoint::new(0, 0), p);
        bad.start = p;

        blackboard::begin_run(&bb);
        assert!(matches!(run_search(bad, &bb, &frames), Err(GridError::DegenerateQuery(_))));
        assert_eq!(blackboard::snapshot(&bb).status, RunStatus::Idle);
    }
}
