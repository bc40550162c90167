use tracing::debug;

use crate::error::Rejection;
use crate::model::Tag;

/// The set of tags a session can annotate with, plus the current selection.
///
/// Tags keep insertion order for display. Names are unique (exact,
/// case-sensitive match) and tags are never removed, so a selection that was
/// valid once stays valid.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: Vec<Tag>,
    selected: Option<String>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag and make it the active selection
    pub fn add_tag(&mut self, name: &str, color: &str) -> Result<&Tag, Rejection> {
        if name.is_empty() {
            debug!("add_tag rejected: empty name");
            return Err(Rejection::EmptyTagName);
        }
        if self.contains(name) {
            debug!(tag = name, "add_tag rejected: duplicate");
            return Err(Rejection::DuplicateTag(name.to_string()));
        }

        self.tags.push(Tag::new(name, color));
        self.selected = Some(name.to_string());
        debug!(tag = name, color, "tag added");

        // Just pushed
        Ok(&self.tags[self.tags.len() - 1])
    }

    pub fn select_tag(&mut self, name: &str) -> Result<(), Rejection> {
        if !self.contains(name) {
            debug!(tag = name, "select_tag rejected: unknown tag");
            return Err(Rejection::UnknownTag(name.to_string()));
        }
        self.selected = Some(name.to_string());
        debug!(tag = name, "tag selected");
        Ok(())
    }

    /// Move the selection to the next (or previous) tag in display order,
    /// wrapping around. With nothing selected, starts at the first (or last).
    pub fn cycle_selection(&mut self, forward: bool) -> Option<&Tag> {
        let count = self.tags.len();
        if count == 0 {
            return None;
        }

        let current = self
            .selected
            .as_deref()
            .and_then(|name| self.tags.iter().position(|t| t.name == name));

        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => {
                if i == 0 {
                    count - 1
                } else {
                    i - 1
                }
            }
            (None, true) => 0,
            (None, false) => count - 1,
        };

        let tag = &self.tags[next];
        self.selected = Some(tag.name.clone());
        debug!(tag = %tag.name, "tag selected");
        Some(tag)
    }

    pub fn selected(&self) -> Option<&Tag> {
        let name = self.selected.as_deref()?;
        self.get(name)
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    pub fn color_of(&self, name: &str) -> Option<&str> {
        self.get(name).map(|t| t.color.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// `(name, color)` pairs in insertion order
    pub fn list_tags(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.tags
            .iter()
            .map(|t| (t.name.as_str(), t.color.as_str()))
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
