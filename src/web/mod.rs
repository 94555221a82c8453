mod loader;
mod view;

pub use loader::{ResponseMeta, WebLoader};
pub use view::{ContentFrame, ContentHost};
