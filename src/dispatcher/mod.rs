mod builder;
mod core;
mod timer;

pub use builder::DispatcherBuilder;
pub use core::Dispatcher;
