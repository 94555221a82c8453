use crate::queue::QueueRef;
use crate::task::Task;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Delivers delayed submissions. One thread sleeps until the earliest
/// deadline, then pushes the entry's task onto its target queue.
pub(crate) struct Timer {
    shared: Arc<TimerShared>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

struct TimerShared {
    state: Mutex<TimerState>,
    condvar: Condvar,
}

struct TimerState {
    entries: BinaryHeap<TimerEntry>,
    shutdown: bool,
}

struct TimerEntry {
    deadline: Instant,
    queue: QueueRef,
    task: Task,
}

impl Eq for TimerEntry {}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline.eq(&other.deadline)
    }
}

// Reversed so the BinaryHeap yields the earliest deadline first.
impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.deadline.cmp(&self.deadline)
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Timer {
    pub(crate) fn new() -> Self {
        let shared = Arc::new(TimerShared {
            state: Mutex::new(TimerState {
                entries: BinaryHeap::new(),
                shutdown: false,
            }),
            condvar: Condvar::new(),
        });

        let worker = shared.clone();
        let handle = thread::Builder::new()
            .name("cadre-timer".to_string())
            .spawn(move || worker.run())
            .expect("failed to spawn timer thread");

        Self {
            shared,
            handle: Mutex::new(Some(handle)),
        }
    }

    pub(crate) fn schedule(&self, queue: QueueRef, delay: Duration, task: Task) {
        let mut state = self.shared.state.lock().unwrap();
        if state.shutdown {
            return;
        }
        state.entries.push(TimerEntry {
            deadline: Instant::now() + delay,
            queue,
            task,
        });
        drop(state);

        self.shared.condvar.notify_all();
    }

    /// Stops the timer thread. Entries that have not fired yet are dropped.
    pub(crate) fn shutdown(&self) {
        self.shared.state.lock().unwrap().shutdown = true;
        self.shared.condvar.notify_all();

        if let Some(handle) = self.handle.lock().unwrap().take() {
            let _ = handle.join();
        }
    }
}

impl TimerShared {
    fn run(&self) {
        loop {
            let due = {
                let mut state = self.state.lock().unwrap();
                loop {
                    if state.shutdown {
                        return;
                    }

                    let now = Instant::now();
                    let next = state.entries.peek().map(|entry| entry.deadline);

                    match next {
                        Some(deadline) if deadline <= now => {
                            if let Some(entry) = state.entries.pop() {
                                break entry;
                            }
                        }
                        Some(deadline) => {
                            let (next_state, _) = self
                                .condvar
                                .wait_timeout(state, deadline - now)
                                .unwrap();
                            state = next_state;
                        }
                        None => state = self.condvar.wait(state).unwrap(),
                    }
                }
            };

            due.queue.push(due.task);
        }
    }
}
