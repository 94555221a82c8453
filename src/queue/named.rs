use crate::group::TaskGroup;
use crate::queue::{MainQueue, QueueKind, QueueRef, SerialQueue};

use std::sync::Arc;

/// A user-creatable execution queue: either a new private serial queue or a
/// handle to the process's single main queue.
///
/// Clones share the underlying queue.
#[derive(Clone)]
pub struct NamedQueue {
    inner: NamedInner,
}

#[derive(Clone)]
enum NamedInner {
    Main(Arc<MainQueue>),
    Serial(Arc<SerialQueue>),
}

impl NamedQueue {
    /// Creates a new private FIFO queue with a dedicated worker thread.
    ///
    /// The label, if any, is attached to the worker thread for diagnostics
    /// only; it has no semantic effect on scheduling.
    pub fn serial(label: Option<&str>) -> Self {
        Self {
            inner: NamedInner::Serial(Arc::new(SerialQueue::new(label))),
        }
    }

    /// Binds to the dispatcher's main queue. Constructed through
    /// [`Dispatcher::named_main`](crate::Dispatcher::named_main) so that every
    /// "main" queue resolves to the same instance.
    pub(crate) fn main(queue: Arc<MainQueue>) -> Self {
        Self {
            inner: NamedInner::Main(queue),
        }
    }

    /// Submits `task` as a barrier and returns immediately.
    ///
    /// When the task runs, no other task on this queue runs concurrently with
    /// it, everything submitted earlier has completed, and everything
    /// submitted later waits. On a serial queue FIFO ordering already
    /// guarantees all of this; the barrier adds nothing extra.
    pub fn async_barrier<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.queue_ref().submit(task);
    }

    /// Same exclusivity guarantee as [`async_barrier`](Self::async_barrier),
    /// but blocks the calling thread until `task` has finished.
    ///
    /// Calling this from the queue's own worker (or, for a main-bound queue,
    /// from the thread pumping the main queue) deadlocks. That is a caller
    /// contract, not guarded against.
    pub fn sync_barrier<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let group = TaskGroup::new();
        group.enter();

        let signal = group.clone();
        self.queue_ref().submit(move || {
            task();
            signal.leave();
        });

        group.wait_forever();
    }

    /// Pauses dequeuing of not-yet-started tasks. An already-running task is
    /// unaffected.
    pub fn suspend(&self) {
        match &self.inner {
            NamedInner::Main(queue) => queue.suspend(),
            NamedInner::Serial(queue) => queue.suspend(),
        }
    }

    /// Resumes dequeuing. Calls are not reference-counted: one `resume`
    /// undoes any number of prior `suspend` calls.
    pub fn resume(&self) {
        match &self.inner {
            NamedInner::Main(queue) => queue.resume(),
            NamedInner::Serial(queue) => queue.resume(),
        }
    }

    pub(crate) fn queue_ref(&self) -> QueueRef {
        let kind = match &self.inner {
            NamedInner::Main(queue) => QueueKind::Main(queue.clone()),
            NamedInner::Serial(queue) => QueueKind::Serial(queue.clone()),
        };

        QueueRef { kind }
    }
}
