//! Tagmark CLI - Terminal-based span tagging tool

mod app;
mod config;
mod io;
mod ui;

use std::io::stdout;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{error, info};

use app::{App, InputTarget, Mode};
use config::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    let dir = io::tagmark_dir()?;
    let config_path = args.config.clone().unwrap_or_else(|| dir.join("config.toml"));
    let mut settings = config::load_settings(&config_path)?;
    settings.apply_args(&args);

    let log_path = io::init_logging(&dir, &settings.log_filter)?;
    info!(log = %log_path.display(), config = %config_path.display(), "tagmark starting");

    // Session is set up before the terminal switches to the alternate screen
    let mut app = App::new(&settings);
    app.add_preset_tags(&settings.tags);
    info!(session = %app.session.id(), tags = app.session.registry().len(), "session ready");

    match &args.file {
        Some(path) => match io::load_text(path) {
            Ok(text) => {
                if app.submit_text(&text) {
                    app.set_status(&format!("Loaded {}", path.display()));
                }
            }
            Err(e) => {
                error!("{:#}", e);
                app.set_status(&format!("Error: {}", e));
            }
        },
        None => app.set_status("Press 't' to add a tag, 'i' to enter text, '?' for help"),
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        error!("{:#}", e);
        eprintln!("Error: {}", e);
    }

    info!(
        session = %app.session.id(),
        annotations = app.session.annotations().len(),
        "tagmark exiting"
    );
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // Clear status on any key
            app.clear_status();

            match app.mode {
                Mode::Normal => handle_normal_mode(app, key.code),
                Mode::Visual => handle_visual_mode(app, key.code),
                Mode::Input => handle_input_mode(app, key.code, key.modifiers),
                Mode::Help => {
                    app.mode = Mode::Normal;
                }
            }
        }
    }
    Ok(())
}

fn handle_normal_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.mode = Mode::Help,

        // Tags and text
        KeyCode::Char('t') => app.begin_new_tag(),
        KeyCode::Tab => app.cycle_tag(true),
        KeyCode::BackTab => app.cycle_tag(false),
        KeyCode::Char('i') => app.begin_draft(),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('h') | KeyCode::Left => app.move_left(),
        KeyCode::Char('l') | KeyCode::Right => app.move_right(),
        KeyCode::Char('w') => app.move_word_forward(),
        KeyCode::Char('b') => app.move_word_back(),
        KeyCode::Char('0') | KeyCode::Home => app.move_to_line_start(),
        KeyCode::Char('$') | KeyCode::End => app.move_to_line_end(),
        KeyCode::Char('g') => app.move_to_top(),
        KeyCode::Char('G') => app.move_to_bottom(),

        // Annotation navigation
        KeyCode::Char(']') => app.next_annotation(),
        KeyCode::Char('[') => app.prev_annotation(),

        // Visual mode
        KeyCode::Char('v') => app.enter_visual_mode(),

        KeyCode::Char('x') => {
            app.remove_annotation_at_cursor();
        }

        _ => {}
    }
}

fn handle_visual_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_selection(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('h') | KeyCode::Left => app.move_left(),
        KeyCode::Char('l') | KeyCode::Right => app.move_right(),
        KeyCode::Char('w') => app.move_word_forward(),
        KeyCode::Char('b') => app.move_word_back(),
        KeyCode::Char('0') | KeyCode::Home => app.move_to_line_start(),
        KeyCode::Char('$') | KeyCode::End => app.move_to_line_end(),

        // Tag is read when the selection is applied
        KeyCode::Tab => app.cycle_tag(true),
        KeyCode::BackTab => app.cycle_tag(false),

        KeyCode::Char('a') | KeyCode::Enter => {
            app.commit_selection();
        }
        _ => {}
    }
}

fn handle_input_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match app.input_target {
        InputTarget::TagName | InputTarget::TagColor => handle_tag_input(app, code),
        InputTarget::Draft => handle_draft_input(app, code, modifiers),
    }
}

fn handle_tag_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => {
            if app.input_target == InputTarget::TagName {
                app.confirm_tag_name();
            } else {
                app.confirm_tag_color();
            }
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.input_buffer.push(c);
        }
        _ => {}
    }
}

fn handle_draft_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    match code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Char('s') | KeyCode::Char('d') if ctrl => {
            app.submit_draft();
        }
        KeyCode::Enter => app.push_draft_char('\n'),
        KeyCode::Tab => app.push_draft_char('\t'),
        KeyCode::Backspace => app.pop_draft_char(),
        KeyCode::Char(c) => app.push_draft_char(c),
        _ => {}
    }
}
