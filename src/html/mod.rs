//! HTML output: page framing, text escaping and style scope nesting

mod emitter;
pub mod page;

pub use emitter::{ScopeEmitter, CLOSE_TAG};
