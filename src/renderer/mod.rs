//! Block dispatch and rendering: type strings to typed props, props to views.

mod dynamic;
mod registry;
mod resolve;
mod view;

pub use dynamic::DynamicBlockRenderer;
pub use registry::{builtin_registry, BlockEntry, BlockRegistry, Dispatched};
pub use resolve::{resolve_block, resolve_page, RenderLimits, RenderedBlock, ResolvedBlock};
pub use view::{style_string, Answer, BlockCallbacks, BlockPropsView, NotConfigured, ResolvedBlockView};
