use cadre::{Dispatcher, NamedQueue, QueueCategory};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

#[test]
fn test_barrier_runs_after_earlier_and_before_later_tasks() {
    let dispatcher = Dispatcher::new();
    let queue = NamedQueue::serial(Some("barrier"));

    let before = Arc::new(AtomicUsize::new(0));
    let after = Arc::new(AtomicUsize::new(0));
    let fence_ok = Arc::new(AtomicBool::new(false));

    for _ in 0..4 {
        let before = before.clone();
        dispatcher.spawn(QueueCategory::Custom(queue.clone()), move || {
            thread::sleep(Duration::from_millis(5));
            before.fetch_add(1, Ordering::SeqCst);
        });
    }

    {
        let before = before.clone();
        let after = after.clone();
        let fence_ok = fence_ok.clone();
        queue.async_barrier(move || {
            let all_before_done = before.load(Ordering::SeqCst) == 4;
            let none_after_started = after.load(Ordering::SeqCst) == 0;
            fence_ok.store(all_before_done && none_after_started, Ordering::SeqCst);
        });
    }

    for _ in 0..3 {
        let after = after.clone();
        dispatcher.spawn(QueueCategory::Custom(queue.clone()), move || {
            after.fetch_add(1, Ordering::SeqCst);
        });
    }

    queue.sync_barrier(|| {});

    assert!(
        fence_ok.load(Ordering::SeqCst),
        "barrier must run strictly after all earlier and before any later task"
    );
    assert_eq!(after.load(Ordering::SeqCst), 3);
}

#[test]
fn test_sync_barrier_blocks_until_task_ran() {
    let queue = NamedQueue::serial(None);
    let ran = Arc::new(AtomicBool::new(false));

    let flag = ran.clone();
    queue.sync_barrier(move || {
        thread::sleep(Duration::from_millis(20));
        flag.store(true, Ordering::SeqCst);
    });

    assert!(
        ran.load(Ordering::SeqCst),
        "sync_barrier must not return before its task completed"
    );
}
