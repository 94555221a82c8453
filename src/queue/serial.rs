use crate::task::Task;

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

/// A private FIFO queue backed by one dedicated worker thread.
///
/// Tasks execute one at a time in submission order. The optional label is
/// diagnostics-only: it names the worker thread and has no effect on
/// scheduling. Two queues created with the same label are distinct.
pub(crate) struct SerialQueue {
    shared: Arc<SerialShared>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

struct SerialShared {
    state: Mutex<SerialState>,
    condvar: Condvar,
}

struct SerialState {
    tasks: VecDeque<Task>,
    suspended: bool,
    shutdown: bool,
}

impl SerialQueue {
    pub(crate) fn new(label: Option<&str>) -> Self {
        let shared = Arc::new(SerialShared {
            state: Mutex::new(SerialState {
                tasks: VecDeque::new(),
                suspended: false,
                shutdown: false,
            }),
            condvar: Condvar::new(),
        });

        let worker = shared.clone();
        let mut builder = thread::Builder::new();
        if let Some(label) = label.filter(|l| !l.is_empty()) {
            builder = builder.name(label.to_string());
        }
        let handle = builder
            .spawn(move || worker.run())
            .expect("failed to spawn serial queue worker");

        Self {
            shared,
            handle: Mutex::new(Some(handle)),
        }
    }

    pub(crate) fn submit(&self, task: Task) {
        let mut state = self.shared.state.lock().unwrap();
        if state.shutdown {
            return;
        }
        state.tasks.push_back(task);
        drop(state);

        self.shared.condvar.notify_all();
    }

    /// Stops dequeuing of not-yet-started tasks. The task currently running,
    /// if any, is unaffected.
    pub(crate) fn suspend(&self) {
        self.shared.state.lock().unwrap().suspended = true;
    }

    /// Resumes dequeuing. Not reference-counted: a single call undoes any
    /// number of prior `suspend` calls.
    pub(crate) fn resume(&self) {
        self.shared.state.lock().unwrap().suspended = false;
        self.shared.condvar.notify_all();
    }
}

// Joins the worker so queued tasks drain before the queue is gone. Must not
// run on the worker itself, i.e. a task must not own the last queue handle.
impl Drop for SerialQueue {
    fn drop(&mut self) {
        self.shared.state.lock().unwrap().shutdown = true;
        self.shared.condvar.notify_all();

        if let Some(handle) = self.handle.lock().unwrap().take() {
            let _ = handle.join();
        }
    }
}

impl SerialShared {
    fn run(&self) {
        loop {
            let task = {
                let mut state = self.state.lock().unwrap();
                loop {
                    if state.shutdown && (state.tasks.is_empty() || state.suspended) {
                        return;
                    }
                    if !state.suspended
                        && let Some(task) = state.tasks.pop_front()
                    {
                        break task;
                    }
                    state = self.condvar.wait(state).unwrap();
                }
            };

            task();
        }
    }
}
