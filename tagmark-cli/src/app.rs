use tracing::{debug, warn};

use tagmark_core::{Annotation, CursorState, Rejection, SessionController, Span};

use crate::config::{Settings, TagPreset};

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Visual,
    Input,
    Help,
}

/// Input target for text input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    TagName,
    TagColor,
    Draft,
}

/// Terminal front end state around a [`SessionController`].
///
/// Plays both outside roles the session expects: it turns cursor selections
/// into spans, and it draws what the session renders.
pub struct App {
    pub session: SessionController,
    pub cursor: CursorState,
    pub mode: Mode,
    pub running: bool,

    // Selection anchor as a char offset
    pub selection_anchor: Option<usize>,

    // Review list position
    pub review_selected: usize,

    // Input state
    pub input_buffer: String,
    pub input_target: InputTarget,

    // New tag form
    pub pending_tag_name: Option<String>,
    pub default_color: String,
    pub mark_fallback_color: String,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self {
            session: SessionController::new(),
            cursor: CursorState::new(),
            mode: Mode::Normal,
            running: true,

            selection_anchor: None,

            review_selected: 0,

            input_buffer: String::new(),
            input_target: InputTarget::TagName,

            pending_tag_name: None,
            default_color: settings.default_color.clone(),
            mark_fallback_color: settings.mark_fallback_color.clone(),

            status_message: None,
        }
    }

    /// Register configured tags; rejected presets are logged and skipped
    pub fn add_preset_tags(&mut self, presets: &[TagPreset]) {
        for preset in presets {
            if let Err(rejection) = self.session.add_tag(&preset.name, &preset.color) {
                warn!(tag = %preset.name, "preset tag skipped: {rejection}");
            }
        }
    }

    /// Submit text directly, as when a file is given on the command line
    pub fn submit_text(&mut self, text: &str) -> bool {
        match self.session.submit_text(text) {
            Ok(_) => {
                self.after_submit();
                true
            }
            Err(rejection) => {
                self.reject(&rejection);
                false
            }
        }
    }

    fn after_submit(&mut self) {
        let (content, words) = match self.session.buffer() {
            Some(buffer) => (buffer.content().to_string(), buffer.word_count()),
            None => return,
        };
        self.cursor.set_content(&content);
        self.selection_anchor = None;
        self.review_selected = 0;
        self.mode = Mode::Normal;
        self.set_status(&format!("Text submitted ({} words)", words));
    }

    // Tag form

    pub fn begin_new_tag(&mut self) {
        self.pending_tag_name = None;
        self.input_buffer.clear();
        self.input_target = InputTarget::TagName;
        self.mode = Mode::Input;
    }

    /// Accept the typed name and move on to its color
    pub fn confirm_tag_name(&mut self) {
        let name = std::mem::take(&mut self.input_buffer);
        if name.is_empty() {
            self.reject(&Rejection::EmptyTagName);
            return;
        }
        self.pending_tag_name = Some(name);
        self.input_buffer = self.default_color.clone();
        self.input_target = InputTarget::TagColor;
    }

    pub fn confirm_tag_color(&mut self) -> bool {
        let name = self.pending_tag_name.take().unwrap_or_default();
        let color = std::mem::take(&mut self.input_buffer);
        self.mode = Mode::Normal;

        match self.session.add_tag(&name, &color) {
            Ok(tag) => {
                let msg = format!("Tag {} added and selected", tag.name);
                self.set_status(&msg);
                true
            }
            Err(rejection) => {
                self.reject(&rejection);
                false
            }
        }
    }

    pub fn cancel_input(&mut self) {
        self.pending_tag_name = None;
        self.input_buffer.clear();
        self.mode = Mode::Normal;
    }

    pub fn cycle_tag(&mut self, forward: bool) {
        let msg = match self.session.cycle_tag(forward) {
            Some(tag) => format!("Tag {} selected", tag.name),
            None => "No tags yet. Press 't' to add one".to_string(),
        };
        self.set_status(&msg);
    }

    // Draft text

    pub fn begin_draft(&mut self) {
        self.input_buffer = self.session.draft().to_string();
        self.input_target = InputTarget::Draft;
        self.mode = Mode::Input;
        self.session.update_draft(self.input_buffer.clone());
    }

    pub fn push_draft_char(&mut self, c: char) {
        self.input_buffer.push(c);
        self.session.update_draft(self.input_buffer.clone());
    }

    pub fn pop_draft_char(&mut self) {
        self.input_buffer.pop();
        self.session.update_draft(self.input_buffer.clone());
    }

    pub fn submit_draft(&mut self) -> bool {
        match self.session.submit_draft() {
            Ok(_) => {
                self.input_buffer.clear();
                self.after_submit();
                true
            }
            Err(rejection) => {
                self.reject(&rejection);
                false
            }
        }
    }

    // Cursor movement methods
    pub fn move_up(&mut self) {
        self.cursor.move_up();
    }

    pub fn move_down(&mut self) {
        self.cursor.move_down();
    }

    pub fn move_left(&mut self) {
        self.cursor.move_left();
    }

    pub fn move_right(&mut self) {
        self.cursor.move_right();
    }

    pub fn move_to_line_start(&mut self) {
        self.cursor.move_to_start();
    }

    pub fn move_to_line_end(&mut self) {
        self.cursor.move_to_end();
    }

    pub fn move_to_top(&mut self) {
        self.cursor.move_to_top();
    }

    pub fn move_to_bottom(&mut self) {
        self.cursor.move_to_bottom();
    }

    pub fn move_word_forward(&mut self) {
        self.cursor.move_word_forward();
    }

    pub fn move_word_back(&mut self) {
        self.cursor.move_word_back();
    }

    // Selection

    /// Enter visual/selection mode at the cursor
    pub fn enter_visual_mode(&mut self) {
        if !self.session.is_finalized() {
            self.reject(&Rejection::NoText);
            return;
        }
        self.mode = Mode::Visual;
        self.selection_anchor = Some(self.cursor.offset());
    }

    pub fn cancel_selection(&mut self) {
        self.mode = Mode::Normal;
        self.selection_anchor = None;
    }

    /// Span between the anchor and the cursor, including the char under the
    /// cursor. Clamped to the end of the text, so it can still come out empty.
    pub fn selection_span(&self) -> Option<Span> {
        if self.mode != Mode::Visual {
            return None;
        }
        let anchor = self.selection_anchor?;
        let span = Span::ordered(anchor, self.cursor.offset());
        let end = (span.end + 1).min(self.cursor.end_offset());
        Some(Span::new(span.start, end.max(span.start)))
    }

    /// Hand the current selection to the session as a new span
    pub fn commit_selection(&mut self) -> bool {
        let span = match self.selection_span() {
            Some(s) => s,
            None => return false,
        };
        self.cancel_selection();

        let msg = match self.session.commit_span(span) {
            Ok(ann) => format!("Tagged {} chars as {}", ann.span.len(), ann.tag_name),
            Err(rejection) => {
                self.reject(&rejection);
                return false;
            }
        };
        self.review_selected = self.session.annotations().len().saturating_sub(1);
        self.set_status(&msg);
        true
    }

    /// Drop the annotation under the cursor by handing the session the
    /// recomputed list without it.
    pub fn remove_annotation_at_cursor(&mut self) -> bool {
        let offset = self.cursor.offset();
        let index = match self.session.annotations().position_at(offset) {
            Some(i) => i,
            None => {
                self.set_status("No annotation under cursor");
                return false;
            }
        };

        let remaining: Vec<Annotation> = self
            .session
            .annotations()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, ann)| ann.clone())
            .collect();

        if let Err(rejection) = self.session.replace_annotations(remaining) {
            self.reject(&rejection);
            return false;
        }

        let count = self.session.annotations().len();
        if self.review_selected >= count && count > 0 {
            self.review_selected = count - 1;
        }
        debug!(index, "annotation removed");
        self.set_status("Annotation removed");
        true
    }

    // Review navigation

    pub fn next_annotation(&mut self) {
        let count = self.session.annotations().len();
        if count > 0 {
            self.review_selected = (self.review_selected + 1) % count;
            self.jump_to_review_selected();
        }
    }

    pub fn prev_annotation(&mut self) {
        let count = self.session.annotations().len();
        if count > 0 {
            self.review_selected = if self.review_selected == 0 {
                count - 1
            } else {
                self.review_selected - 1
            };
            self.jump_to_review_selected();
        }
    }

    fn jump_to_review_selected(&mut self) {
        if let Some(ann) = self.session.annotations().as_slice().get(self.review_selected) {
            let start = ann.span.start;
            self.cursor.set_cursor_offset(start);
        }
    }

    // Status

    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    fn reject(&mut self, rejection: &Rejection) {
        self.set_status(&format!("Rejected: {}", rejection));
    }

    /// Get title for display
    pub fn title(&self) -> String {
        let tag = self
            .session
            .registry()
            .selected_name()
            .unwrap_or("no tag");
        format!(
            "{} | tag: {} | {} annotations",
            self.session.stage().as_str(),
            tag,
            self.session.annotations().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagmark_core::Stage;

    fn app_with_text(text: &str) -> App {
        let mut app = App::new(&Settings::default());
        app.add_preset_tags(&[TagPreset {
            name: "T".into(),
            color: "#ff0000".into(),
        }]);
        assert!(app.submit_text(text));
        app
    }

    #[test]
    fn test_tag_form_resets_to_default_color() {
        let mut app = App::new(&Settings::default());
        app.begin_new_tag();
        app.input_buffer.push_str("PERSON");
        app.confirm_tag_name();
        assert_eq!(app.input_target, InputTarget::TagColor);
        assert_eq!(app.input_buffer, "#ffcc00");

        assert!(app.confirm_tag_color());
        assert_eq!(app.session.registry().selected_name(), Some("PERSON"));
        assert_eq!(app.mode, Mode::Normal);

        app.begin_new_tag();
        app.input_buffer.push_str("PERSON");
        app.confirm_tag_name();
        assert!(!app.confirm_tag_color());
        assert_eq!(app.session.registry().len(), 1);
    }

    #[test]
    fn test_draft_flow() {
        let mut app = App::new(&Settings::default());
        app.begin_draft();
        assert_eq!(app.session.stage(), Stage::EnteringText);
        app.push_draft_char(' ');
        assert!(!app.submit_draft());

        for c in "hi there".chars() {
            app.push_draft_char(c);
        }
        assert!(app.submit_draft());
        assert_eq!(app.session.stage(), Stage::Annotating);
        assert_eq!(app.session.buffer().map(|b| b.content()), Some(" hi there"));
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_visual_selection_includes_cursor_char() {
        let mut app = app_with_text("hello world");
        app.enter_visual_mode();
        for _ in 0..4 {
            app.move_right();
        }
        assert_eq!(app.selection_span(), Some(Span::new(0, 5)));
        assert!(app.commit_selection());

        let marks: Vec<_> = app.session.review().map(|m| m.as_tuple()).collect();
        assert_eq!(marks, vec![("T", "#ff0000", "hello")]);
    }

    #[test]
    fn test_selection_at_end_of_text_is_rejected() {
        let mut app = app_with_text("ab");
        app.cursor.set_cursor_offset(2);
        app.enter_visual_mode();
        assert_eq!(app.selection_span(), Some(Span::new(2, 2)));
        assert!(!app.commit_selection());
        assert!(app.session.annotations().is_empty());
    }

    #[test]
    fn test_visual_needs_text() {
        let mut app = App::new(&Settings::default());
        app.enter_visual_mode();
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_remove_annotation_at_cursor() {
        let mut app = app_with_text("one two");
        app.session.commit_span(Span::new(0, 3)).unwrap();
        app.session.commit_span(Span::new(4, 7)).unwrap();

        app.cursor.set_cursor_offset(5);
        assert!(app.remove_annotation_at_cursor());
        let texts: Vec<_> = app.session.review().map(|m| m.text).collect();
        assert_eq!(texts, vec!["one"]);

        app.cursor.set_cursor_offset(3);
        assert!(!app.remove_annotation_at_cursor());
    }

    #[test]
    fn test_review_navigation_moves_cursor() {
        let mut app = app_with_text("one two three");
        app.session.commit_span(Span::new(4, 7)).unwrap();
        app.session.commit_span(Span::new(8, 13)).unwrap();

        app.next_annotation();
        assert_eq!(app.cursor.offset(), 8);
        app.next_annotation();
        assert_eq!(app.cursor.offset(), 4);
        app.prev_annotation();
        assert_eq!(app.cursor.offset(), 8);
    }
}
