use crate::queue::MainQueue;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const PUMP_SLICE: Duration = Duration::from_millis(100);

/// Result of a bridged asynchronous operation. Numbers coerce to their
/// textual representation.
pub enum ScriptValue {
    Text(String),
    Number(f64),
}

impl ScriptValue {
    fn into_text(self) -> String {
        match self {
            ScriptValue::Text(text) => text,
            ScriptValue::Number(number) => number.to_string(),
        }
    }
}

/// Completion handler for a bridged operation. Call it exactly once; `None`
/// means the operation produced no coercible result.
pub type BridgeCompletion = Box<dyn FnOnce(Option<ScriptValue>) + Send + 'static>;

/// Forces a logically asynchronous result to return synchronously.
///
/// `start` receives a completion handler and kicks off the operation; the
/// calling thread then pumps `main` in short bounded slices until the
/// completion has run, and returns the recorded text, or `None` if the
/// operation produced nothing (or the queue shut down first).
///
/// This only behaves as intended on the thread that pumps the main queue:
/// other queued main-queue work runs during the wait. That reentrancy is a
/// deliberate trade-off over a true blocking wait, which would stall every
/// main-queue submission, including the completion itself when the bridged
/// operation delivers it there.
pub fn block_on_value<F>(main: &MainQueue, start: F) -> Option<String>
where
    F: FnOnce(BridgeCompletion),
{
    let done = Arc::new(AtomicBool::new(false));
    let slot = Arc::new(Mutex::new(None));

    let flag = done.clone();
    let result = slot.clone();
    start(Box::new(move |value| {
        if let Some(value) = value {
            *result.lock().unwrap() = Some(value.into_text());
        }
        flag.store(true, Ordering::Release);
    }));

    while !done.load(Ordering::Acquire) && main.pump(PUMP_SLICE) {}

    let value = slot.lock().unwrap().take();
    if value.is_none() {
        tracing::warn!("bridged operation produced no result");
    }

    value
}
