//! Tagmark Core - Platform-agnostic span tagging library
//!
//! This crate holds the state behind the Tagmark tool: a registry of named,
//! colored tags, the text submitted for annotation, and the annotations
//! committed over it. Front ends feed it spans and read back rendered marks.

pub mod annotations;
pub mod cursor;
pub mod error;
pub mod model;
pub mod registry;
pub mod session;

pub use annotations::{AnnotationSet, RenderedMark};
pub use cursor::CursorState;
pub use error::{Rejection, RejectionKind};
pub use model::{Annotation, Span, Tag, TextBuffer, DEFAULT_TAG_COLOR, FALLBACK_MARK_COLOR};
pub use registry::TagRegistry;
pub use session::{SessionController, Stage};
