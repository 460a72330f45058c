use pathlight_search::{CellState, Grid};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::debug;

/// Broadcast topic with bounded capacity.
/// `T` must be `Send + Sync` because we hop across threads.
#[derive(Debug, Clone)]
pub struct Topic<T> {
    tx: broadcast::Sender<Arc<T>>,
}

impl<T: Send + Sync + 'static> Topic<T> {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publishing with no subscribers is not an error; the message is dropped.
    pub fn publish(&self, msg: T) {
        let _ = self.tx.send(Arc::new(msg));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<T>> {
        self.tx.subscribe()
    }
}

/// Drains `rx` and returns the newest message, if any arrived.
///
/// Lagging is expected when the renderer is slower than the publisher: the
/// skipped messages are superseded by newer ones anyway.
pub fn latest<T: Clone>(rx: &mut broadcast::Receiver<T>) -> Option<T> {
    let mut newest = None;
    loop {
        match rx.try_recv() {
            Ok(msg) => newest = Some(msg),
            Err(TryRecvError::Lagged(skipped)) => debug!(skipped, "Frame receiver lagged"),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return newest,
        }
    }
}

/// Cell states of the grid at one observer call.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub rows: usize,
    pub step: usize,
    /// Row-major, `rows * rows` entries.
    pub states: Vec<CellState>,
}

impl Frame {
    pub fn capture(grid: &Grid, step: usize) -> Self {
        Frame { rows: grid.rows(), step, states: grid.states() }
    }
}
