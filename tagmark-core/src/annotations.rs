use tracing::{debug, warn};

use crate::error::Rejection;
use crate::model::{Annotation, Span, TextBuffer};
use crate::registry::TagRegistry;

/// One annotation resolved against the text it marks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedMark<'a> {
    pub span: Span,
    pub tag_name: &'a str,
    pub color: &'a str,
    pub text: &'a str,
}

impl<'a> RenderedMark<'a> {
    pub fn as_tuple(&self) -> (&'a str, &'a str, &'a str) {
        (self.tag_name, self.color, self.text)
    }
}

/// Committed annotations over one text buffer, in creation order.
///
/// Creation order is also render order: where marks overlap, the later one
/// is drawn on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    annotations: Vec<Annotation>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn a raw span into an annotation with the registry's selected tag.
    ///
    /// The tag and its color are read now, not when the selection started.
    pub fn commit_span(
        &mut self,
        span: Span,
        buffer: &TextBuffer,
        registry: &TagRegistry,
    ) -> Result<&Annotation, Rejection> {
        let tag = match registry.selected() {
            Some(tag) => tag,
            None => {
                debug!(start = span.start, end = span.end, "span discarded: no tag selected");
                return Err(Rejection::NoTagSelected);
            }
        };

        if let Err(rejection) = span.validate(buffer.char_len()) {
            debug!(start = span.start, end = span.end, "span discarded: {rejection}");
            return Err(rejection);
        }

        self.annotations
            .push(Annotation::new(span, tag.name.as_str(), tag.color.as_str()));
        debug!(
            start = span.start,
            end = span.end,
            tag = %tag.name,
            count = self.annotations.len(),
            "span committed"
        );

        // Just pushed
        Ok(&self.annotations[self.annotations.len() - 1])
    }

    /// Take `annotations` as the complete new list; nothing is merged
    pub fn replace_all(&mut self, annotations: Vec<Annotation>) {
        debug!(
            previous = self.annotations.len(),
            count = annotations.len(),
            "annotations replaced"
        );
        self.annotations = annotations;
    }

    pub fn clear(&mut self) {
        self.annotations.clear();
    }

    /// Resolve each annotation against `buffer`, in order.
    ///
    /// Cheap to call again; each call starts from the first annotation.
    pub fn render<'a>(
        &'a self,
        buffer: &'a TextBuffer,
    ) -> impl Iterator<Item = RenderedMark<'a>> + Clone + 'a {
        self.annotations.iter().filter_map(move |ann| match buffer.slice(ann.span) {
            Some(text) => Some(RenderedMark {
                span: ann.span,
                tag_name: &ann.tag_name,
                color: &ann.color,
                text,
            }),
            None => {
                warn!(
                    start = ann.span.start,
                    end = ann.span.end,
                    len = buffer.char_len(),
                    "annotation does not fit the text buffer, skipped"
                );
                None
            }
        })
    }

    /// Topmost annotation covering `offset`
    pub fn annotation_at(&self, offset: usize) -> Option<&Annotation> {
        self.annotations
            .iter()
            .rev()
            .find(|a| a.span.contains(offset))
    }

    /// Index of the topmost annotation covering `offset`
    pub fn position_at(&self, offset: usize) -> Option<usize> {
        self.annotations
            .iter()
            .rposition(|a| a.span.contains(offset))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}
