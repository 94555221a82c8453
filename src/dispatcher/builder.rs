use super::Dispatcher;

use std::thread;

/// Configures the dispatcher's priority tiers before it starts.
///
/// Each tier is a fixed-size worker pool created once and shared by all
/// callers for the dispatcher's lifetime. Tier priority is expressed through
/// pool sizing; defaults derive from the machine's available parallelism.
pub struct DispatcherBuilder {
    high_threads: usize,
    default_threads: usize,
    low_threads: usize,
    background_threads: usize,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        let parallelism = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Self {
            high_threads: parallelism,
            default_threads: parallelism,
            low_threads: (parallelism / 2).max(1),
            background_threads: 1,
        }
    }

    pub fn high_threads(mut self, n: usize) -> Self {
        assert!(n > 0, "high_threads must be > 0");

        self.high_threads = n;
        self
    }

    pub fn default_threads(mut self, n: usize) -> Self {
        assert!(n > 0, "default_threads must be > 0");

        self.default_threads = n;
        self
    }

    pub fn low_threads(mut self, n: usize) -> Self {
        assert!(n > 0, "low_threads must be > 0");

        self.low_threads = n;
        self
    }

    pub fn background_threads(mut self, n: usize) -> Self {
        assert!(n > 0, "background_threads must be > 0");

        self.background_threads = n;
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher::with_tiers(
            self.high_threads,
            self.default_threads,
            self.low_threads,
            self.background_threads,
        )
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
