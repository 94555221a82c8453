use crate::task::Task;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

/// A fixed-size pool of worker threads draining one shared injector queue.
///
/// Tasks may run concurrently and complete in any order. One pool backs each
/// priority tier; tier priority is expressed through pool sizing chosen at
/// build time.
pub(crate) struct WorkerPool {
    injector: Arc<Injector>,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

struct Injector {
    queue: Mutex<VecDeque<Task>>,
    condvar: Condvar,
    shutdown: AtomicBool,
}

impl WorkerPool {
    pub(crate) fn new(label: &str, threads: usize) -> Self {
        let injector = Arc::new(Injector {
            queue: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
            shutdown: AtomicBool::new(false),
        });

        let mut handles = Vec::with_capacity(threads);

        for id in 0..threads {
            let worker = injector.clone();

            let handle = thread::Builder::new()
                .name(format!("{label}-{id}"))
                .spawn(move || worker.run())
                .expect("failed to spawn pool worker");

            handles.push(handle);
        }

        Self {
            injector,
            handles: Mutex::new(handles),
        }
    }

    pub(crate) fn submit(&self, task: Task) {
        if self.injector.shutdown.load(Ordering::Acquire) {
            return;
        }

        self.injector.queue.lock().unwrap().push_back(task);
        self.injector.condvar.notify_all();
    }

    /// Drains queued tasks, then joins every worker. Must not be called from
    /// one of the pool's own workers.
    pub(crate) fn shutdown(&self) {
        self.injector.shutdown.store(true, Ordering::Release);
        self.injector.condvar.notify_all();

        for handle in self.handles.lock().unwrap().drain(..) {
            let _ = handle.join();
        }
    }
}

impl Injector {
    fn run(&self) {
        loop {
            let task = {
                let mut queue = self.queue.lock().unwrap();
                loop {
                    if let Some(task) = queue.pop_front() {
                        break Some(task);
                    }
                    if self.shutdown.load(Ordering::Acquire) {
                        break None;
                    }
                    queue = self.condvar.wait(queue).unwrap();
                }
            };

            match task {
                Some(task) => task(),
                None => return,
            }
        }
    }
}
