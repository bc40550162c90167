use serde::{Deserialize, Serialize};

/// Color given to a tag when the user has not picked one
pub const DEFAULT_TAG_COLOR: &str = "#ffcc00";

/// Color used to draw a mark whose own color is missing or unreadable
pub const FALLBACK_MARK_COLOR: &str = "#a6e22d";

/// A named highlight color
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub color: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}
