pub mod annotation;
pub mod span;
pub mod tag;
pub mod text_buffer;

pub use annotation::Annotation;
pub use span::Span;
pub use tag::{Tag, DEFAULT_TAG_COLOR, FALLBACK_MARK_COLOR};
pub use text_buffer::TextBuffer;
