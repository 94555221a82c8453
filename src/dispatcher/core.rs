use super::builder::DispatcherBuilder;
use super::timer::Timer;
use crate::group::TaskGroup;
use crate::queue::{MainQueue, NamedQueue, QueueCategory, QueueKind, QueueRef, WorkerPool};

use std::sync::Arc;
use std::time::Duration;

/// Single entry point for task submission.
///
/// Owns the main queue, the four priority-tier worker pools, and the delay
/// timer. Components that need dispatch receive a `&Dispatcher` rather than
/// reaching for ambient globals. Dropping the dispatcher drains the pools and
/// shuts everything down; drop it from outside any of its own queues.
pub struct Dispatcher {
    main: Arc<MainQueue>,
    high: Arc<WorkerPool>,
    default: Arc<WorkerPool>,
    low: Arc<WorkerPool>,
    background: Arc<WorkerPool>,
    timer: Timer,
}

impl Dispatcher {
    pub fn new() -> Self {
        DispatcherBuilder::new().build()
    }

    pub(crate) fn with_tiers(
        high: usize,
        default: usize,
        low: usize,
        background: usize,
    ) -> Self {
        Self {
            main: MainQueue::new(),
            high: Arc::new(WorkerPool::new("cadre-high", high)),
            default: Arc::new(WorkerPool::new("cadre-default", default)),
            low: Arc::new(WorkerPool::new("cadre-low", low)),
            background: Arc::new(WorkerPool::new("cadre-background", background)),
            timer: Timer::new(),
        }
    }

    /// The queue selector: resolves a category to the concrete queue work
    /// will be submitted to. Total and side-effect-free.
    pub fn queue(&self, category: QueueCategory) -> QueueRef {
        let kind = match category {
            QueueCategory::Main => QueueKind::Main(self.main.clone()),
            QueueCategory::High => QueueKind::Pool(self.high.clone()),
            QueueCategory::Default => QueueKind::Pool(self.default.clone()),
            QueueCategory::Low => QueueKind::Pool(self.low.clone()),
            QueueCategory::Background => QueueKind::Pool(self.background.clone()),
            QueueCategory::Custom(named) => return named.queue_ref(),
        };

        QueueRef { kind }
    }

    /// The dispatcher's single main queue, for pumping.
    pub fn main_queue(&self) -> Arc<MainQueue> {
        self.main.clone()
    }

    /// A [`NamedQueue`] bound to the main queue. Every handle constructed
    /// this way resolves to the same underlying queue.
    pub fn named_main(&self) -> NamedQueue {
        NamedQueue::main(self.main.clone())
    }

    /// Submits `task` for asynchronous execution and returns immediately.
    ///
    /// FIFO order holds among tasks submitted to the same serial queue; tasks
    /// on the same concurrent tier may run in any order.
    pub fn spawn<F>(&self, category: QueueCategory, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.queue(category).submit(task);
    }

    /// As [`spawn`](Self::spawn), but the resolved queue will not begin
    /// executing `task` before `delay` has elapsed. The delay is a lower
    /// bound, not an exact schedule, and cannot be rescinded.
    pub fn spawn_after<F>(&self, category: QueueCategory, delay: Duration, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.timer.schedule(self.queue(category), delay, Box::new(task));
    }

    /// Submits `task` and blocks the calling thread until it completes.
    ///
    /// Calling this with a category that resolves to the queue the caller is
    /// already executing on deadlocks. Caller contract, not guarded against.
    pub fn sync<F>(&self, category: QueueCategory, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let group = TaskGroup::new();
        group.enter();

        let signal = group.clone();
        self.queue(category).submit(move || {
            task();
            signal.leave();
        });

        group.wait_forever();
    }

    /// Invokes `task` exactly once for each index in `[0, iterations)`,
    /// spread across the resolved queue's workers, and blocks until every
    /// iteration has completed. Iteration order is unspecified.
    pub fn apply<F>(&self, category: QueueCategory, iterations: usize, task: F)
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        if iterations == 0 {
            return;
        }

        let queue = self.queue(category);
        let group = TaskGroup::new();
        let task = Arc::new(task);

        for index in 0..iterations {
            group.enter();

            let signal = group.clone();
            let task = task.clone();
            queue.submit(move || {
                task(index);
                signal.leave();
            });
        }

        group.wait_forever();
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.timer.shutdown();

        self.high.shutdown();
        self.default.shutdown();
        self.low.shutdown();
        self.background.shutdown();

        self.main.shutdown();
    }
}
