use cadre::{Dispatcher, QueueCategory, ScriptValue, block_on_value};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_bridge_returns_value_after_async_delay() {
    let dispatcher = Dispatcher::new();
    let main = dispatcher.main_queue();
    let start = Instant::now();

    let result = block_on_value(&main, |completion| {
        dispatcher.spawn(QueueCategory::Background, move || {
            thread::sleep(Duration::from_millis(50));
            completion(Some(ScriptValue::Text("42".to_string())));
        });
    });

    assert!(
        start.elapsed() >= Duration::from_millis(50),
        "bridge must not return before the value exists"
    );
    assert_eq!(result.as_deref(), Some("42"));
}

#[test]
fn test_bridge_coerces_numeric_results() {
    let dispatcher = Dispatcher::new();
    let main = dispatcher.main_queue();

    let result = block_on_value(&main, |completion| {
        dispatcher.spawn(QueueCategory::Default, move || {
            completion(Some(ScriptValue::Number(480.0)));
        });
    });

    assert_eq!(result.as_deref(), Some("480"));
}

#[test]
fn test_bridge_returns_none_without_result() {
    let dispatcher = Dispatcher::new();
    let main = dispatcher.main_queue();

    let result = block_on_value(&main, |completion| {
        dispatcher.spawn(QueueCategory::Default, move || completion(None));
    });

    assert!(result.is_none(), "a missing result must come back as None");
}

#[test]
fn test_bridge_pumps_other_main_work_while_waiting() {
    let dispatcher = Dispatcher::new();
    let main = dispatcher.main_queue();
    let other_ran = Arc::new(AtomicBool::new(false));

    {
        let other_ran = other_ran.clone();
        dispatcher.spawn(QueueCategory::Main, move || {
            other_ran.store(true, Ordering::SeqCst);
        });
    }

    let result = block_on_value(&main, |completion| {
        dispatcher.spawn(QueueCategory::Background, move || {
            thread::sleep(Duration::from_millis(30));
            completion(Some(ScriptValue::Text("ok".to_string())));
        });
    });

    assert_eq!(result.as_deref(), Some("ok"));
    assert!(
        other_ran.load(Ordering::SeqCst),
        "queued main work must run while the bridge waits"
    );
}
