use serde::{Deserialize, Serialize};

use crate::error::Rejection;

/// A range of text by character offsets, `start` inclusive, `end` exclusive
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Build a span exactly as given. Inverted input stays inverted and is
    /// refused later by [`Span::validate`].
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Build a span from two selection endpoints in either order
    pub fn ordered(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if this span contains the given offset
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Check `start < end <= text_len`
    pub fn validate(&self, text_len: usize) -> Result<(), Rejection> {
        if self.is_empty() || self.end > text_len {
            return Err(Rejection::InvalidSpan {
                start: self.start,
                end: self.end,
                len: text_len,
            });
        }
        Ok(())
    }
}
