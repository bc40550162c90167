use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::annotations::{AnnotationSet, RenderedMark};
use crate::error::Rejection;
use crate::model::{Annotation, Span, Tag, TextBuffer};
use crate::registry::TagRegistry;

/// Workflow stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SettingUpTags,
    EnteringText,
    Annotating,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::SettingUpTags => "Tags",
            Stage::EnteringText => "Text",
            Stage::Annotating => "Annotate",
        }
    }
}

/// Platform-agnostic session state.
///
/// Owns the tag registry, the submitted text and the annotations over it,
/// and decides which operations apply in which stage. Tag management is
/// open in every stage; spans can only be committed once text is submitted.
#[derive(Debug)]
pub struct SessionController {
    id: Uuid,
    started_at: DateTime<Utc>,
    stage: Stage,
    registry: TagRegistry,
    annotations: AnnotationSet,
    buffer: Option<TextBuffer>,
    draft: String,
}

impl SessionController {
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        debug!(session = %id, "session started");
        Self {
            id,
            started_at: Utc::now(),
            stage: Stage::SettingUpTags,
            registry: TagRegistry::new(),
            annotations: AnnotationSet::new(),
            buffer: None,
            draft: String::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    /// The submitted text, once there is one
    pub fn buffer(&self) -> Option<&TextBuffer> {
        self.buffer.as_ref()
    }

    pub fn is_finalized(&self) -> bool {
        self.buffer.is_some()
    }

    // Tags

    pub fn add_tag(&mut self, name: &str, color: &str) -> Result<&Tag, Rejection> {
        self.registry.add_tag(name, color)
    }

    pub fn select_tag(&mut self, name: &str) -> Result<(), Rejection> {
        self.registry.select_tag(name)
    }

    pub fn cycle_tag(&mut self, forward: bool) -> Option<&Tag> {
        self.registry.cycle_selection(forward)
    }

    pub fn list_tags(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.registry.list_tags()
    }

    // Text

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft text. Never touches already submitted text.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        if self.stage == Stage::SettingUpTags {
            self.stage = Stage::EnteringText;
        }
    }

    /// Whether the draft would be accepted by [`SessionController::submit_draft`]
    pub fn can_submit(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Finalize `text` as the buffer to annotate, dropping all annotations
    /// made against any earlier text.
    pub fn submit_text(&mut self, text: &str) -> Result<&TextBuffer, Rejection> {
        if text.trim().is_empty() {
            debug!(session = %self.id, stage = ?self.stage, "submit rejected: blank text");
            return Err(Rejection::BlankText);
        }

        self.draft = text.to_string();
        self.stage = Stage::EnteringText;
        self.annotations.clear();
        let buffer = self.buffer.insert(TextBuffer::new(text));
        self.stage = Stage::Annotating;

        info!(
            session = %self.id,
            chars = buffer.char_len(),
            words = buffer.word_count(),
            "text submitted"
        );
        Ok(buffer)
    }

    pub fn submit_draft(&mut self) -> Result<&TextBuffer, Rejection> {
        let text = self.draft.clone();
        self.submit_text(&text)
    }

    // Annotations

    /// Annotate `span` with the currently selected tag
    pub fn commit_span(&mut self, span: Span) -> Result<&Annotation, Rejection> {
        let buffer = match self.buffer.as_ref() {
            Some(b) => b,
            None => {
                debug!(session = %self.id, "span discarded: no text submitted");
                return Err(Rejection::NoText);
            }
        };
        self.annotations.commit_span(span, buffer, &self.registry)
    }

    /// Take a complete, recomputed annotation list from the interaction layer.
    ///
    /// The list is checked as a whole: every span must fit the submitted text
    /// and every tag must exist. On any failure nothing changes.
    pub fn replace_annotations(&mut self, annotations: Vec<Annotation>) -> Result<(), Rejection> {
        let buffer = self.buffer.as_ref().ok_or(Rejection::NoText)?;

        for ann in &annotations {
            ann.span.validate(buffer.char_len())?;
            if !self.registry.contains(&ann.tag_name) {
                return Err(Rejection::UnknownTag(ann.tag_name.clone()));
            }
        }

        self.annotations.replace_all(annotations);
        Ok(())
    }

    pub fn annotation_at(&self, offset: usize) -> Option<&Annotation> {
        self.annotations.annotation_at(offset)
    }

    pub fn has_annotations(&self) -> bool {
        !self.annotations.is_empty()
    }

    /// Rendered annotations over the submitted text; empty before submission
    pub fn review(&self) -> impl Iterator<Item = RenderedMark<'_>> + '_ {
        self.buffer
            .iter()
            .flat_map(move |buffer| self.annotations.render(buffer))
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_setting_up_tags() {
        let session = SessionController::new();
        assert_eq!(session.stage(), Stage::SettingUpTags);
        assert!(!session.is_finalized());
        assert_eq!(session.review().count(), 0);
    }

    #[test]
    fn test_blank_submit_keeps_stage() {
        let mut session = SessionController::new();
        assert_eq!(session.submit_text("  \n\t"), Err(Rejection::BlankText));
        assert_eq!(session.stage(), Stage::SettingUpTags);
        assert!(session.buffer().is_none());
    }

    #[test]
    fn test_draft_moves_to_entering_text() {
        let mut session = SessionController::new();
        session.update_draft("   ");
        assert_eq!(session.stage(), Stage::EnteringText);
        assert!(!session.can_submit());
        assert!(session.submit_draft().is_err());
        assert_eq!(session.stage(), Stage::EnteringText);

        session.update_draft("some text");
        assert!(session.can_submit());
        session.submit_draft().unwrap();
        assert_eq!(session.stage(), Stage::Annotating);
        assert_eq!(session.buffer().map(|b| b.content()), Some("some text"));
    }

    #[test]
    fn test_draft_edits_do_not_touch_submitted_text() {
        let mut session = SessionController::new();
        session.submit_text("original").unwrap();
        session.update_draft("edited");

        assert_eq!(session.stage(), Stage::Annotating);
        assert_eq!(session.buffer().map(|b| b.content()), Some("original"));
    }

    #[test]
    fn test_commit_before_text_is_precondition_failure() {
        let mut session = SessionController::new();
        session.add_tag("T", "#000000").unwrap();
        let err = session.commit_span(Span::new(0, 1)).unwrap_err();
        assert_eq!(err, Rejection::NoText);
        assert_eq!(err.kind(), crate::RejectionKind::PreconditionNotMet);
    }

    #[test]
    fn test_replace_annotations_is_atomic() {
        let mut session = SessionController::new();
        session.add_tag("T", "#000000").unwrap();
        session.submit_text("hello world").unwrap();
        session.commit_span(Span::new(0, 5)).unwrap();

        let bad_bounds = vec![
            Annotation::new(Span::new(6, 11), "T", "#000000"),
            Annotation::new(Span::new(6, 12), "T", "#000000"),
        ];
        assert!(session.replace_annotations(bad_bounds).is_err());

        let bad_tag = vec![Annotation::new(Span::new(6, 11), "NOPE", "#000000")];
        assert_eq!(
            session.replace_annotations(bad_tag),
            Err(Rejection::UnknownTag("NOPE".into()))
        );

        assert_eq!(session.annotations().len(), 1);
        assert_eq!(session.annotations().as_slice()[0].span, Span::new(0, 5));
    }

    #[test]
    fn test_tags_stay_open_while_annotating() {
        let mut session = SessionController::new();
        session.submit_text("hello world").unwrap();
        session.add_tag("A", "#aaaaaa").unwrap();
        session.add_tag("B", "#bbbbbb").unwrap();
        session.select_tag("A").unwrap();
        session.commit_span(Span::new(0, 5)).unwrap();

        assert_eq!(session.stage(), Stage::Annotating);
        assert_eq!(session.annotation_at(2).map(|a| a.tag_name.as_str()), Some("A"));
    }
}
