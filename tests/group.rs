use cadre::{Dispatcher, QueueCategory, TaskGroup};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[test]
fn test_wait_zero_after_balanced_enter_leave() {
    let group = TaskGroup::new();

    group.enter();
    group.leave();

    assert!(
        group.wait(Duration::ZERO),
        "a balanced group should report completion on an instant poll"
    );
}

#[test]
fn test_wait_times_out_with_outstanding_enter() {
    let group = TaskGroup::new();
    group.enter();

    let start = Instant::now();
    let completed = group.wait(Duration::from_millis(100));
    let elapsed = start.elapsed();

    assert!(!completed, "wait must report failure while an enter is outstanding");
    assert!(
        elapsed >= Duration::from_millis(100),
        "wait returned before the timeout elapsed: {elapsed:?}"
    );
    assert!(
        elapsed < Duration::from_secs(2),
        "wait overshot the timeout by far too much: {elapsed:?}"
    );

    group.leave();
}

#[test]
fn test_notify_after_zero_fires_once_promptly() {
    let dispatcher = Dispatcher::new();
    let group = TaskGroup::new();

    group.enter();
    group.leave();

    let fired = Arc::new(AtomicUsize::new(0));
    let signal = TaskGroup::new();
    signal.enter();

    {
        let fired = fired.clone();
        let signal = signal.clone();
        group.notify(&dispatcher, QueueCategory::Default, move || {
            fired.fetch_add(1, Ordering::SeqCst);
            signal.leave();
        });
    }

    assert!(
        signal.wait(Duration::from_secs(1)),
        "notify registered on an already-empty group should fire promptly"
    );

    std::thread::sleep(Duration::from_millis(20));
    assert_eq!(fired.load(Ordering::SeqCst), 1, "notify must fire exactly once");
}

#[test]
fn test_notify_fires_on_last_leave() {
    let dispatcher = Dispatcher::new();
    let group = TaskGroup::new();
    group.enter();

    let fired = Arc::new(AtomicUsize::new(0));
    let signal = TaskGroup::new();
    signal.enter();

    {
        let fired = fired.clone();
        let signal = signal.clone();
        group.notify(&dispatcher, QueueCategory::Default, move || {
            fired.fetch_add(1, Ordering::SeqCst);
            signal.leave();
        });
    }

    assert!(
        !signal.wait(Duration::from_millis(50)),
        "notify must not fire while the group is still pending"
    );

    group.leave();

    assert!(
        signal.wait(Duration::from_secs(1)),
        "notify should fire once the last leave lands"
    );
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_multiple_notifications_each_fire_once() {
    let dispatcher = Dispatcher::new();
    let group = TaskGroup::new();
    group.enter();

    let fired = Arc::new(AtomicUsize::new(0));
    let signal = TaskGroup::new();

    for _ in 0..3 {
        signal.enter();

        let fired = fired.clone();
        let signal = signal.clone();
        group.notify(&dispatcher, QueueCategory::High, move || {
            fired.fetch_add(1, Ordering::SeqCst);
            signal.leave();
        });
    }

    group.leave();

    assert!(
        signal.wait(Duration::from_secs(1)),
        "every registered notification should fire"
    );
    assert_eq!(fired.load(Ordering::SeqCst), 3);
}
