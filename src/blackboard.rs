use parking_lot::RwLock;
use pathlight_search::SearchReport;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunStatus {
    #[default]
    Idle,
    Searching,
}

/// State shared between the render loop and the search worker.
#[derive(Clone, Debug, Default)]
pub struct RunBoard {
    pub status: RunStatus,
    pub cancel_requested: bool,
    /// Observer calls made by the current (or last) search.
    pub steps: usize,
    pub last_report: Option<SearchReport>,
}

pub type Blackboard = Arc<RwLock<RunBoard>>;

pub fn snapshot(bb: &Blackboard) -> RunBoard {
    (*bb.read()).clone()
}

pub fn begin_run(bb: &Blackboard) {
    let mut g = bb.write();
    g.status = RunStatus::Searching;
    g.cancel_requested = false;
    g.steps = 0;
}

pub fn record_step(bb: &Blackboard, steps: usize) {
    bb.write().steps = steps;
}

pub fn finish_run(bb: &Blackboard, report: Option<SearchReport>) {
    let mut g = bb.write();
    g.status = RunStatus::Idle;
    g.last_report = report;
}

pub fn request_cancel(bb: &Blackboard) {
    bb.write().cancel_requested = true;
}

pub fn cancel_requested(bb: &Blackboard) -> bool {
    bb.read().cancel_requested
}
