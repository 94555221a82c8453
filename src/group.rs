use crate::dispatcher::Dispatcher;
use crate::queue::{QueueCategory, QueueRef};
use crate::task::Task;

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// Tracks a cohort of in-flight tasks through enter/leave accounting.
///
/// Every `enter` must be matched by exactly one later `leave`. The pending
/// count is not observable directly, only through `wait` and `notify`.
/// Unbalanced accounting is a caller contract: it manifests as a `wait` that
/// times out or a `notify` that never fires, not as a runtime error.
///
/// Clones share the same group and may enter, leave, and wait from any thread.
#[derive(Clone)]
pub struct TaskGroup {
    shared: Arc<GroupShared>,
}

struct GroupShared {
    state: Mutex<GroupState>,
    condvar: Condvar,
}

struct GroupState {
    pending: usize,
    notifications: Vec<Notification>,
}

struct Notification {
    queue: QueueRef,
    task: Task,
}

impl TaskGroup {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(GroupShared {
                state: Mutex::new(GroupState {
                    pending: 0,
                    notifications: Vec::new(),
                }),
                condvar: Condvar::new(),
            }),
        }
    }

    /// Increments the pending count. Pair with exactly one later `leave`.
    pub fn enter(&self) {
        self.shared.state.lock().unwrap().pending += 1;
    }

    /// Decrements the pending count. When it reaches zero, waiters unblock
    /// and every registered notification is submitted to its queue.
    pub fn leave(&self) {
        let fired = {
            let mut state = self.shared.state.lock().unwrap();
            debug_assert!(state.pending > 0, "leave() without a matching enter()");

            state.pending = state.pending.saturating_sub(1);
            if state.pending > 0 {
                return;
            }

            std::mem::take(&mut state.notifications)
        };

        self.shared.condvar.notify_all();

        for notification in fired {
            notification.queue.push(notification.task);
        }
    }

    /// Blocks until the pending count reaches zero or `timeout` elapses.
    /// Returns `true` iff the count reached zero in time. A zero timeout
    /// polls once without blocking.
    pub fn wait(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;

        let mut state = self.shared.state.lock().unwrap();
        while state.pending > 0 {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }

            let (next, _) = self
                .shared
                .condvar
                .wait_timeout(state, deadline - now)
                .unwrap();
            state = next;
        }

        true
    }

    pub(crate) fn wait_forever(&self) {
        let mut state = self.shared.state.lock().unwrap();
        while state.pending > 0 {
            state = self.shared.condvar.wait(state).unwrap();
        }
    }

    /// Schedules `task` on the resolved queue once the pending count reaches
    /// zero, immediately if it is already zero. Each registration fires
    /// exactly once; multiple registrations are independent.
    pub fn notify<F>(&self, dispatcher: &Dispatcher, category: QueueCategory, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let queue = dispatcher.queue(category);
        let task: Task = Box::new(task);

        let mut state = self.shared.state.lock().unwrap();
        if state.pending == 0 {
            drop(state);
            queue.push(task);
        } else {
            state.notifications.push(Notification { queue, task });
        }
    }
}

impl Default for TaskGroup {
    fn default() -> Self {
        Self::new()
    }
}
