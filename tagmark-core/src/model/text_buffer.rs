use chrono::{DateTime, Utc};

use super::Span;

/// Text that has been submitted for annotation.
///
/// A buffer only exists once finalized; there is no way to change its
/// content afterwards. Submitting new text builds a new buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    content: String,
    char_len: usize,
    finalized_at: DateTime<Utc>,
}

impl TextBuffer {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let char_len = content.chars().count();
        Self {
            content,
            char_len,
            finalized_at: Utc::now(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Length in chars, the unit all span offsets use
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    pub fn finalized_at(&self) -> DateTime<Utc> {
        self.finalized_at
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Text covered by `span`, or `None` if the span does not fit this buffer
    pub fn slice(&self, span: Span) -> Option<&str> {
        if span.validate(self.char_len).is_err() {
            return None;
        }
        let start = self.byte_offset(span.start)?;
        let end = self.byte_offset(span.end)?;
        self.content.get(start..end)
    }

    /// Convert a char offset to a byte offset into `content`
    fn byte_offset(&self, char_offset: usize) -> Option<usize> {
        if char_offset == self.char_len {
            return Some(self.content.len());
        }
        self.content
            .char_indices()
            .nth(char_offset)
            .map(|(byte, _)| byte)
    }
}
