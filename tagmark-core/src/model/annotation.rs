use serde::{Deserialize, Serialize};

use super::Span;

/// A span marked with a tag.
///
/// `color` is copied from the tag when the annotation is made and never
/// follows the tag afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Annotation {
    #[serde(flatten)]
    pub span: Span,
    #[serde(rename = "tag")]
    pub tag_name: String,
    pub color: String,
}

impl Annotation {
    pub fn new(span: Span, tag_name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            span,
            tag_name: tag_name.into(),
            color: color.into(),
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let ann = Annotation::new(Span::new(0, 5), "GREETING", "#ffcc00");
        let json = serde_json::to_value(&ann).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"start": 0, "end": 5, "tag": "GREETING", "color": "#ffcc00"})
        );

        let back: Annotation = serde_json::from_value(json).unwrap();
        assert_eq!(back, ann);
    }
}
