use tagmark_core::{Annotation, Rejection, RejectionKind, SessionController, Span, Stage};

fn annotating(text: &str) -> SessionController {
    let mut session = SessionController::new();
    session.submit_text(text).unwrap();
    session
}

#[test]
fn distinct_tags_are_listed_with_their_colors() {
    let mut session = SessionController::new();
    let tags = [("PERSON", "#ff0000"), ("PLACE", "#00ff00"), ("THING", "#ff0000")];
    for (name, color) in tags {
        session.add_tag(name, color).unwrap();
    }

    assert_eq!(session.list_tags().collect::<Vec<_>>(), tags.to_vec());

    let before: Vec<(String, String)> = session
        .list_tags()
        .map(|(n, c)| (n.to_string(), c.to_string()))
        .collect();
    assert!(session.add_tag("PLACE", "#123456").is_err());
    let after: Vec<(String, String)> = session
        .list_tags()
        .map(|(n, c)| (n.to_string(), c.to_string()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn selecting_unknown_tag_keeps_selection() {
    let mut session = SessionController::new();
    session.add_tag("PERSON", "#ff0000").unwrap();

    let err = session.select_tag("MISSING").unwrap_err();
    assert_eq!(err.kind(), RejectionKind::ValidationRejected);
    assert_eq!(session.registry().selected_name(), Some("PERSON"));
}

#[test]
fn commit_without_selected_tag_never_appends() {
    let mut session = annotating("hello world");

    for span in [Span::new(0, 5), Span::new(2, 2), Span::new(9, 3), Span::new(0, 99)] {
        assert_eq!(session.commit_span(span), Err(Rejection::NoTagSelected));
    }
    assert!(!session.has_annotations());
}

#[test]
fn zero_length_span_is_rejected() {
    let mut session = annotating("hello world");
    session.add_tag("T", "#000000").unwrap();

    let err = session.commit_span(Span::new(2, 2)).unwrap_err();
    assert!(matches!(err, Rejection::InvalidSpan { start: 2, end: 2, .. }));
    assert_eq!(err.kind(), RejectionKind::ValidationRejected);
    assert!(session.annotations().is_empty());
}

#[test]
fn hello_world_greeting() {
    let mut session = SessionController::new();
    session.add_tag("GREETING", "#ffcc00").unwrap();
    session.submit_text("hello world").unwrap();

    let ann = session.commit_span(Span::new(0, 5)).unwrap().clone();
    assert_eq!(ann, Annotation::new(Span::new(0, 5), "GREETING", "#ffcc00"));

    let rendered: Vec<_> = session.review().map(|m| m.as_tuple()).collect();
    assert_eq!(rendered, vec![("GREETING", "#ffcc00", "hello")]);

    let buffer = session.buffer().unwrap();
    let again: Vec<_> = session
        .annotations()
        .render(buffer)
        .map(|m| m.as_tuple())
        .collect();
    assert_eq!(again, rendered);
}

#[test]
fn whitespace_text_does_not_leave_tag_setup() {
    let mut session = SessionController::new();
    let err = session.submit_text("  ").unwrap_err();

    assert_eq!(err.kind(), RejectionKind::PreconditionNotMet);
    assert_eq!(session.stage(), Stage::SettingUpTags);
    assert!(!session.is_finalized());
}

#[test]
fn resubmitting_text_clears_annotations() {
    let mut session = SessionController::new();
    session.add_tag("T", "#000000").unwrap();
    session.submit_text("abc").unwrap();
    session.commit_span(Span::new(0, 2)).unwrap();
    assert!(session.has_annotations());

    session.submit_text("def").unwrap();
    assert!(session.annotations().is_empty());
    assert_eq!(session.buffer().map(|b| b.content()), Some("def"));
    assert_eq!(session.stage(), Stage::Annotating);
}

#[test]
fn replace_all_overwrites_committed_annotations() {
    let mut session = annotating("hello world");
    session.add_tag("T", "#000000").unwrap();
    session.commit_span(Span::new(0, 5)).unwrap();

    session.replace_annotations(Vec::new()).unwrap();
    assert!(session.annotations().is_empty());
    assert_eq!(session.review().count(), 0);
}

#[test]
fn annotation_color_is_a_snapshot() {
    let mut session = annotating("red green");
    session.add_tag("RED", "#ff0000").unwrap();
    session.commit_span(Span::new(0, 3)).unwrap();
    session.add_tag("GREEN", "#00ff00").unwrap();
    session.commit_span(Span::new(4, 9)).unwrap();

    let colors: Vec<_> = session.review().map(|m| (m.tag_name, m.color)).collect();
    assert_eq!(colors, vec![("RED", "#ff0000"), ("GREEN", "#00ff00")]);
}

#[test]
fn selection_is_read_at_commit_time() {
    let mut session = annotating("alpha beta");
    session.add_tag("A", "#aaaaaa").unwrap();
    session.add_tag("B", "#bbbbbb").unwrap();

    // Selection changes between the start of a drag and its commit
    let pending = Span::ordered(5, 0);
    session.select_tag("A").unwrap();
    let ann = session.commit_span(pending).unwrap();
    assert_eq!(ann.tag_name, "A");
}

#[test]
fn removal_through_recomputed_list() {
    let mut session = annotating("one two three");
    session.add_tag("T", "#000000").unwrap();
    session.commit_span(Span::new(0, 3)).unwrap();
    session.commit_span(Span::new(4, 7)).unwrap();
    session.commit_span(Span::new(8, 13)).unwrap();

    let remaining: Vec<Annotation> = session
        .annotations()
        .iter()
        .filter(|a| !a.span.contains(5))
        .cloned()
        .collect();
    session.replace_annotations(remaining).unwrap();

    let texts: Vec<_> = session.review().map(|m| m.text).collect();
    assert_eq!(texts, vec!["one", "three"]);
}
