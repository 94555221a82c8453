mod bridge;
mod dispatcher;
mod group;
mod queue;
mod task;

pub mod web;

pub use bridge::{BridgeCompletion, ScriptValue, block_on_value};
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use group::TaskGroup;
pub use queue::{MainQueue, NamedQueue, QueueCategory, QueueRef};
pub use task::Task;
