/// A unit of work accepted by every queue: no arguments, no result, run at most once.
///
/// Tasks have no identity and no cancellation handle. Once submitted they cannot
/// be withdrawn.
pub type Task = Box<dyn FnOnce() + Send + 'static>;
