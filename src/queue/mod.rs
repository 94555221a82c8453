mod category;
mod main;
mod named;
mod pool;
mod serial;

pub use category::QueueCategory;
pub use main::MainQueue;
pub use named::NamedQueue;

pub(crate) use pool::WorkerPool;
pub(crate) use serial::SerialQueue;

use crate::task::Task;

use std::sync::Arc;

/// Handle to one concrete queue, as resolved by the queue selector.
///
/// Cloning is cheap and every clone refers to the same underlying queue.
#[derive(Clone)]
pub struct QueueRef {
    pub(crate) kind: QueueKind,
}

#[derive(Clone)]
pub(crate) enum QueueKind {
    Main(Arc<MainQueue>),
    Pool(Arc<WorkerPool>),
    Serial(Arc<SerialQueue>),
}

impl QueueRef {
    /// Enqueues `task` for asynchronous execution and returns immediately.
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.push(Box::new(task));
    }

    pub(crate) fn push(&self, task: Task) {
        match &self.kind {
            QueueKind::Main(queue) => queue.submit(task),
            QueueKind::Pool(pool) => pool.submit(task),
            QueueKind::Serial(queue) => queue.submit(task),
        }
    }
}
