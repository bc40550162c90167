use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use tagmark_core::RenderedMark;

use crate::app::{App, InputTarget, Mode};

// Catppuccin Mocha colors
const BASE: Color = Color::Rgb(30, 30, 46);
const SURFACE0: Color = Color::Rgb(49, 50, 68);
const SURFACE1: Color = Color::Rgb(69, 71, 90);
const TEXT: Color = Color::Rgb(205, 214, 244);
const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
const GREEN: Color = Color::Rgb(166, 227, 161);
const BLUE: Color = Color::Rgb(137, 180, 250);
const MAUVE: Color = Color::Rgb(203, 166, 247);

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0]);
    draw_main_area(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);

    match app.mode {
        Mode::Input => draw_input_dialog(frame, app),
        Mode::Help => draw_help(frame),
        _ => {}
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title_bar = Paragraph::new(format!(" Tagmark - {}", app.title()))
        .style(Style::default().fg(TEXT).bg(SURFACE0));

    frame.render_widget(title_bar, area);
}

fn draw_main_area(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Editor
            Constraint::Length(32), // Sidebar
        ])
        .split(area);

    draw_editor(frame, app, chunks[0]);
    draw_sidebar(frame, app, chunks[1]);
}

fn draw_editor(frame: &mut Frame, app: &App, area: Rect) {
    let mode_indicator = match app.mode {
        Mode::Visual => " [VISUAL]",
        _ => "",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title(format!("Text{}", mode_indicator));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !app.session.is_finalized() {
        let hint = if app.session.draft().is_empty() {
            "Press 'i' to enter text, 't' to add a tag"
        } else {
            "Press 'i' to edit the draft, Ctrl-S in the editor submits it"
        };
        let paragraph = Paragraph::new(hint).style(Style::default().fg(SUBTEXT0));
        frame.render_widget(paragraph, inner);
        return;
    }

    let annotations = app.session.annotations();
    let selection = app.selection_span();
    let cursor_offset = app.cursor.offset();
    let show_cursor = matches!(app.mode, Mode::Normal | Mode::Visual);

    let mut lines: Vec<Line> = Vec::with_capacity(app.cursor.line_count());
    for row in 0..app.cursor.line_count() {
        let line_text = app.cursor.line(row).unwrap_or("");
        let line_start = app.cursor.line_start(row).unwrap_or(0);
        let mut spans: Vec<Span> = Vec::new();

        for (col, ch) in line_text.chars().enumerate() {
            let offset = line_start + col;
            let mut style = Style::default().fg(TEXT);

            if let Some(ann) = annotations.annotation_at(offset) {
                style = style
                    .fg(BASE)
                    .bg(mark_color(&ann.color, &app.mark_fallback_color));
            }

            if selection.is_some_and(|s| s.contains(offset)) {
                style = style.bg(SURFACE1).add_modifier(Modifier::BOLD);
            }

            if show_cursor && offset == cursor_offset {
                style = style.add_modifier(Modifier::REVERSED);
            }

            spans.push(Span::styled(ch.to_string(), style));
        }

        // Cursor parked at end of line
        if show_cursor && cursor_offset == line_start + line_text.chars().count() {
            spans.push(Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)));
        }

        lines.push(Line::from(spans));
    }

    let visible_height = inner.height as usize;
    let scroll_offset = if app.cursor.row >= visible_height {
        app.cursor.row - visible_height + 1
    } else {
        0
    };

    let paragraph = Paragraph::new(lines)
        .scroll((scroll_offset as u16, 0))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, inner);
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let registry = app.session.registry();

    // The tag list only takes room once there is something in it
    let tag_height = if registry.is_empty() {
        3
    } else {
        registry.len() as u16 + 2
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(tag_height.min(area.height / 2)), Constraint::Min(0)])
        .split(area);

    let tag_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUBTEXT0))
        .title(format!("Tags ({})", registry.len()));

    if registry.is_empty() {
        let hint = Paragraph::new(" 't' adds a tag")
            .style(Style::default().fg(SUBTEXT0))
            .block(tag_block);
        frame.render_widget(hint, chunks[0]);
    } else {
        let selected = registry.selected_name();
        let items: Vec<ListItem> = registry
            .list_tags()
            .map(|(name, color)| {
                let is_selected = selected == Some(name);
                let marker = if is_selected { ">" } else { " " };
                let style = if is_selected {
                    Style::default().fg(TEXT).bg(SURFACE1)
                } else {
                    Style::default().fg(TEXT)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", marker), style),
                    Span::styled(
                        "  ",
                        Style::default().bg(mark_color(color, &app.mark_fallback_color)),
                    ),
                    Span::styled(format!(" {} {}", name, color), style),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items).block(tag_block), chunks[0]);
    }

    let review_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUBTEXT0))
        .title(format!("Annotations ({})", app.session.annotations().len()));

    if !app.session.has_annotations() {
        frame.render_widget(review_block, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = app
        .session
        .review()
        .enumerate()
        .map(|(i, mark)| review_item(app, i, &mark))
        .collect();

    frame.render_widget(List::new(items).block(review_block), chunks[1]);
}

fn review_item<'a>(app: &App, index: usize, mark: &RenderedMark<'a>) -> ListItem<'a> {
    let selected = index == app.review_selected;
    let marker = if selected { ">" } else { " " };
    let preview: String = mark.text.chars().take(18).collect::<String>().replace('\n', " ");

    let mut style = Style::default()
        .fg(BASE)
        .bg(mark_color(mark.color, &app.mark_fallback_color));
    if selected {
        style = style.add_modifier(Modifier::BOLD);
    }

    ListItem::new(Line::from(vec![
        Span::styled(format!("{} ", marker), Style::default().fg(TEXT)),
        Span::styled(format!("{}: {}", mark.tag_name, preview), style),
    ]))
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_str = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Visual => "VISUAL",
        Mode::Input => "INPUT",
        Mode::Help => "HELP",
    };

    let status = app.status_message.as_deref().unwrap_or("");

    let help_hint = "t tag | i text | v select | a apply | x remove | ? help";

    let status_text = format!(
        " {} | {}",
        mode_str,
        if status.is_empty() { help_hint } else { status },
    );

    let status_bar =
        Paragraph::new(status_text).style(Style::default().fg(SUBTEXT0).bg(SURFACE0));

    frame.render_widget(status_bar, area);
}

fn draw_input_dialog(frame: &mut Frame, app: &App) {
    let (title, width, height) = match app.input_target {
        InputTarget::TagName => ("New tag name (Enter to continue)", 50, 3),
        InputTarget::TagColor => ("Tag color, e.g. #ffcc00 (Enter to add)", 50, 3),
        InputTarget::Draft => ("Text (Ctrl-S submits, Esc leaves)", 70, 14),
    };

    let area = centered_rect(width, height, frame.area());
    frame.render_widget(Clear, area);

    let border = if app.input_target == InputTarget::Draft && !app.session.can_submit() {
        SUBTEXT0
    } else {
        GREEN
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut input_style = Style::default().fg(TEXT);
    if app.input_target == InputTarget::TagColor {
        if let Ok(color) = app.input_buffer.parse::<Color>() {
            input_style = input_style.fg(color);
        }
    }

    let input = Paragraph::new(format!("{}_", app.input_buffer))
        .style(input_style)
        .wrap(Wrap { trim: false });
    frame.render_widget(input, inner);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(60, 22, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Help (press any key to close)");

    let heading = Style::default().fg(MAUVE).add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Tags", heading)),
        Line::from("  t          Add a tag (name, then color)"),
        Line::from("  Tab/S-Tab  Select next/prev tag"),
        Line::from(""),
        Line::from(Span::styled("Text", heading)),
        Line::from("  i          Edit the draft text"),
        Line::from("  Ctrl-S     Submit the draft (clears annotations)"),
        Line::from(""),
        Line::from(Span::styled("Annotating", heading)),
        Line::from("  h/j/k/l    Move cursor"),
        Line::from("  w/b g/G    Word / top and bottom"),
        Line::from("  v          Start selection"),
        Line::from("  a/Enter    Tag selection with the selected tag"),
        Line::from("  x          Remove annotation under cursor"),
        Line::from("  ]/[        Next/prev annotation"),
        Line::from(""),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(SUBTEXT0))),
    ];

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

/// Parse a tag color, falling back when it is not something we can draw
fn mark_color(color: &str, fallback: &str) -> Color {
    color
        .parse::<Color>()
        .or_else(|_| fallback.parse::<Color>())
        .unwrap_or(GREEN)
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
