use crate::queue::NamedQueue;

/// Logical destination for a submission, resolved to a concrete queue by the
/// dispatcher's queue selector.
///
/// `High` through `Background` name the dispatcher's priority-tiered
/// concurrent pools, highest to lowest. `Main` is the single pump-driven
/// serial queue. `Custom` targets a caller-owned [`NamedQueue`].
#[derive(Clone, Default)]
pub enum QueueCategory {
    Main,
    High,
    #[default]
    Default,
    Low,
    Background,
    Custom(NamedQueue),
}
