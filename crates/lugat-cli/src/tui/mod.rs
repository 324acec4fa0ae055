//! Lugat TUI
//!
//! Terminal user interface for browsing lookup history.
//!
//! ## Layout
//!
//! - Top: History / Favorites tabs
//! - Left: Entries of the selected list
//! - Right: Detail of the selected entry, with its note when it has one
//!
//! ## Navigation
//!
//! - j/k or ↑/↓: Move selection up/down
//! - gg / G: First / last entry
//! - Tab: Switch between History and Favorites
//! - Enter: Open entry in browser (not recorded again)
//! - q: Quit
//!
//! ## Commands
//!
//! - /: Look up a word
//! - f: Toggle favorite
//! - n: Edit note
//! - d: Delete entry (asks y/n)
//! - r: Open the dictionary home page

mod app;
mod ui;

use std::io::stdout;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use lugat_core::{Config, NavigationGate, Store};
use ratatui::prelude::*;

use app::{App, InputMode};

use crate::browser::{Browser, SystemBrowser};
use crate::{editor, logging, shortcut};

/// Something the event loop must do outside the normal key handling
enum Action {
    None,
    EditNote,
}

/// Run the TUI application
pub fn run(config_path: Option<&PathBuf>) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    // Initialize TUI logging (file-based, only if LUGAT_LOG is set)
    logging::init_tui_logging(&config);
    shortcut::try_create_on_startup(&config);

    let mut gate = NavigationGate::from_config(&config);
    let mut store = Store::open_with_config(config);
    let mut browser = SystemBrowser;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(&store);
    if let Some(warning) = store.load_warning() {
        app.set_error(match warning.recovery_suggestion() {
            Some(hint) => format!("{}\n\n{}", warning, hint),
            None => warning.to_string(),
        });
    }

    let result = run_app(&mut terminal, &mut app, &mut store, &mut gate, &mut browser);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &mut Store,
    gate: &mut NavigationGate,
    browser: &mut dyn Browser,
) -> Result<()> {
    loop {
        // Check for status message timeout
        app.check_status_timeout();

        // Draw UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };

        // Only handle key press events (not release)
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // If error modal is showing, any key dismisses it
        if app.has_error() {
            app.clear_error();
            continue;
        }

        // If help is showing, any key dismisses it
        if app.show_help {
            app.show_help = false;
            continue;
        }

        let action = match app.input_mode {
            InputMode::Normal => handle_normal_mode(app, store, gate, browser, key.code, key.modifiers),
            InputMode::Lookup => {
                handle_lookup_mode(app, store, gate, browser, key.code, key.modifiers);
                Action::None
            }
            InputMode::ConfirmDelete => {
                handle_confirm_mode(app, store, key.code);
                Action::None
            }
        };

        if let Action::EditNote = action {
            edit_note(terminal, app, store)?;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key events in normal mode
fn handle_normal_mode(
    app: &mut App,
    store: &mut Store,
    gate: &mut NavigationGate,
    browser: &mut dyn Browser,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Action {
    // Clear status message on navigation keys
    if matches!(
        code,
        KeyCode::Char('j')
            | KeyCode::Char('k')
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Tab
            | KeyCode::Char('g')
            | KeyCode::Char('G')
    ) {
        app.status_message = None;
    }

    // Clear pending 'g' if timeout expired (500ms)
    if let Some(time) = app.pending_g {
        if time.elapsed() > std::time::Duration::from_millis(500) {
            app.pending_g = None;
        }
    }

    match code {
        // Quit
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Tab | KeyCode::BackTab => app.switch_view(store),

        KeyCode::Enter => {
            if let Err(e) = app.reopen_current(store, gate, browser) {
                app.set_error(format!("Failed to open: {:#}", e));
            }
        }
        KeyCode::Char('/') => app.enter_lookup_mode(),
        KeyCode::Char('f') => {
            if let Err(e) = app.toggle_favorite(store) {
                app.set_error(format!("Failed to save favorite: {:#}", e));
            }
        }
        KeyCode::Char('n') => {
            if app.current_entry().is_some() {
                return Action::EditNote;
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('r') => {
            if let Err(e) = app.open_home(store, gate, browser) {
                app.set_error(format!("Failed to open: {:#}", e));
            }
        }
        KeyCode::Char('?') => app.toggle_help(),

        // Vim navigation: G (go to last)
        KeyCode::Char('G') => {
            app.pending_g = None;
            app.move_to_last();
        }

        // Vim navigation: g (start of gg sequence)
        KeyCode::Char('g') => {
            if app.pending_g.is_some() {
                app.pending_g = None;
                app.move_to_first();
            } else {
                app.pending_g = Some(std::time::Instant::now());
            }
        }

        _ => {
            // Any other key clears pending 'g'
            app.pending_g = None;
        }
    }

    Action::None
}

/// Handle key events while typing a word
fn handle_lookup_mode(
    app: &mut App,
    store: &mut Store,
    gate: &mut NavigationGate,
    browser: &mut dyn Browser,
    code: KeyCode,
    modifiers: KeyModifiers,
) {
    match code {
        KeyCode::Esc => app.exit_input_mode(),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => app.exit_input_mode(),
        KeyCode::Enter => {
            if let Err(e) = app.submit_lookup(store, gate, browser) {
                app.set_error(format!("Lookup failed: {:#}", e));
            }
        }
        KeyCode::Char(c) => app.insert_char(c),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        _ => {}
    }
}

/// Handle the y/n answer to a delete
fn handle_confirm_mode(app: &mut App, store: &mut Store, code: KeyCode) {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Err(e) = app.confirm_delete(store) {
                app.set_error(format!("Failed to delete: {:#}", e));
            }
        }
        _ => app.cancel_delete(),
    }
}

/// Leave the alternate screen, run $EDITOR on the note, come back
fn edit_note<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, store: &mut Store) -> Result<()> {
    let Some(entry) = app.current_entry() else {
        return Ok(());
    };
    let (word, current) = (entry.word.clone(), entry.notes.clone());

    // Exit TUI temporarily for editor
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(cursor::Show)?;

    let edited = editor::edit_note(&word, &current);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    terminal.clear()?;

    match edited {
        Ok(text) if text == current => app.set_status("Note unchanged"),
        Ok(text) => {
            if let Err(e) = app.set_note_on_current(store, &text) {
                app.set_error(format!("Failed to save note: {:#}", e));
            }
        }
        Err(e) => app.set_error(format!("Editor failed: {:#}", e)),
    }

    Ok(())
}
