use crate::task::Task;

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// The single pump-driven serial queue standing in for the platform UI queue.
///
/// Tasks may be submitted from any thread but only execute when a thread pumps
/// the queue. All submissions share FIFO order. The dispatcher owns exactly one
/// main queue; `NamedQueue` handles constructed as "main" resolve to it.
pub struct MainQueue {
    state: Mutex<MainState>,
    condvar: Condvar,
}

struct MainState {
    tasks: VecDeque<Task>,
    suspended: bool,
    shutdown: bool,
}

impl MainQueue {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(MainState {
                tasks: VecDeque::new(),
                suspended: false,
                shutdown: false,
            }),
            condvar: Condvar::new(),
        })
    }

    pub(crate) fn submit(&self, task: Task) {
        let mut state = self.state.lock().unwrap();
        if state.shutdown {
            return;
        }
        state.tasks.push_back(task);
        drop(state);

        self.condvar.notify_all();
    }

    /// Runs every ready task on the calling thread, waiting up to `max_wait`
    /// when the queue is idle. Returns `false` once the owning dispatcher has
    /// shut down, `true` otherwise.
    ///
    /// Arbitrary queued work runs during a pump; callers that pump while
    /// holding state must tolerate reentrancy. Serial execution assumes a
    /// single pumping thread.
    pub fn pump(&self, max_wait: Duration) -> bool {
        let mut state = self.state.lock().unwrap();

        if state.suspended || state.tasks.is_empty() {
            if state.shutdown {
                return false;
            }
            let (next, _) = self.condvar.wait_timeout(state, max_wait).unwrap();
            state = next;
        }

        // One task per lock acquisition, so a suspend landing mid-pump holds
        // everything that has not started yet.
        loop {
            if state.shutdown {
                return false;
            }
            if state.suspended {
                return true;
            }
            let Some(task) = state.tasks.pop_front() else {
                return true;
            };
            drop(state);

            task();

            state = self.state.lock().unwrap();
        }
    }

    /// Pumps until the owning dispatcher shuts down. Intended for the thread
    /// that plays the role of the application main thread.
    pub fn run(&self) {
        while self.pump(Duration::from_millis(50)) {}
    }

    pub(crate) fn suspend(&self) {
        self.state.lock().unwrap().suspended = true;
    }

    pub(crate) fn resume(&self) {
        self.state.lock().unwrap().suspended = false;
        self.condvar.notify_all();
    }

    pub(crate) fn shutdown(&self) {
        self.state.lock().unwrap().shutdown = true;
        self.condvar.notify_all();
    }
}
