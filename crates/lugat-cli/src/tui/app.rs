//! Application state and logic

use lugat_core::{Entry, NavigationGate, NavigationOutcome, RecordOutcome, Rejection, Store};

use crate::browser::{self, Browser};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Typing a word to look up (after pressing /)
    Lookup,
    /// Waiting for y/n on a delete
    ConfirmDelete,
}

/// Which list is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView {
    History,
    Favorites,
}

impl ListView {
    /// Switch to the other list
    pub fn toggle(self) -> Self {
        match self {
            ListView::History => ListView::Favorites,
            ListView::Favorites => ListView::History,
        }
    }
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Which list has focus
    pub view: ListView,
    /// Entries of the current list (snapshot taken after every change)
    pub entries: Vec<Entry>,
    /// Number of entries in the full history
    pub history_len: usize,
    /// Number of favorites
    pub favorites_len: usize,
    /// Currently selected entry index
    pub selected: usize,
    /// Lookup input buffer
    pub input: String,
    /// Cursor position in the input, in characters
    pub cursor: usize,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<std::time::Instant>,
    /// Error shown in a modal until a key is pressed
    pub error_message: Option<String>,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Pending 'g' keypress for gg sequence (with timestamp)
    pub pending_g: Option<std::time::Instant>,
}

impl App {
    /// Create a new app with data from store
    pub fn new(store: &Store) -> Self {
        let mut app = Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            view: ListView::History,
            entries: Vec::new(),
            history_len: 0,
            favorites_len: 0,
            selected: 0,
            input: String::new(),
            cursor: 0,
            status_message: None,
            status_message_time: None,
            error_message: None,
            show_help: false,
            pending_g: None,
        };
        app.refresh(store);
        app
    }

    /// Re-read the current list from the store
    pub fn refresh(&mut self, store: &Store) {
        self.history_len = store.entries().len();
        self.favorites_len = store.document().favorite_count();
        self.entries = match self.view {
            ListView::History => store.entries().to_vec(),
            ListView::Favorites => store.favorites().into_iter().cloned().collect(),
        };

        // Clamp selection to new list bounds (preserve position when possible)
        if self.entries.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.entries.len() - 1);
        }
    }

    /// Switch between history and favorites
    pub fn switch_view(&mut self, store: &Store) {
        self.view = self.view.toggle();
        self.selected = 0;
        self.refresh(store);
    }

    /// Get the currently selected entry
    pub fn current_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    /// Set a status message (will auto-dismiss after 3 seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(std::time::Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > std::time::Duration::from_secs(3) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Show an error modal
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Move selection up
    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down
    pub fn move_down(&mut self) {
        if self.selected < self.entries.len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    /// Move selection to first item (vim 'gg')
    pub fn move_to_first(&mut self) {
        self.selected = 0;
    }

    /// Move selection to last item (vim 'G')
    pub fn move_to_last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }

    // ==================== Lookup input ====================

    /// Start typing a word
    pub fn enter_lookup_mode(&mut self) {
        self.input_mode = InputMode::Lookup;
        self.input.clear();
        self.cursor = 0;
    }

    /// Leave lookup or confirm mode
    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.cursor = 0;
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, c: char) {
        let byte_index = self.byte_index();
        self.input.insert(byte_index, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_index = self.byte_index();
            self.input.remove(byte_index);
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    /// Look up the typed word
    pub fn submit_lookup(
        &mut self,
        store: &mut Store,
        gate: &mut NavigationGate,
        browser: &mut dyn Browser,
    ) -> anyhow::Result<()> {
        let word = self.input.clone();
        self.exit_input_mode();

        let Some(url) = store.config().lookup_url(&word) else {
            self.set_status("Nothing to look up");
            return Ok(());
        };

        let outcome = browser::visit(browser, gate, store, &url);
        self.refresh(store);

        match outcome? {
            NavigationOutcome::Recorded(RecordOutcome::Added(id)) => {
                // Show the new entry
                if self.view == ListView::History {
                    if let Some(index) = self.entries.iter().position(|e| e.id == id) {
                        self.selected = index;
                    }
                }
                let word = store.get(id).map(|e| e.word.clone()).unwrap_or_default();
                self.set_status(format!("Looked up '{}'", word));
            }
            NavigationOutcome::Recorded(RecordOutcome::Rejected(Rejection::Duplicate(id))) => {
                let word = store.get(id).map(|e| e.word.clone()).unwrap_or_default();
                self.set_status(format!("Opened '{}' (already in history)", word));
            }
            NavigationOutcome::Recorded(RecordOutcome::Rejected(rejection)) => {
                self.set_status(format!("Opened, not recorded: {}", rejection));
            }
            NavigationOutcome::OffSite | NavigationOutcome::Suppressed => {}
        }
        Ok(())
    }

    // ==================== Entry actions ====================

    /// Re-open the selected entry (not recorded again)
    pub fn reopen_current(
        &mut self,
        store: &mut Store,
        gate: &mut NavigationGate,
        browser: &mut dyn Browser,
    ) -> anyhow::Result<()> {
        let Some(entry) = self.current_entry() else {
            return Ok(());
        };
        let (word, url) = (entry.word.clone(), entry.url.clone());

        browser::revisit(browser, gate, store, &url)?;
        self.set_status(format!("Opened '{}'", word));
        Ok(())
    }

    /// Open the dictionary home page
    pub fn open_home(
        &mut self,
        store: &mut Store,
        gate: &mut NavigationGate,
        browser: &mut dyn Browser,
    ) -> anyhow::Result<()> {
        let home = store.config().home_url().to_string();
        browser::visit(browser, gate, store, &home)?;
        self.set_status("Opened the dictionary home page");
        Ok(())
    }

    /// Toggle favorite on the selected entry
    pub fn toggle_favorite(&mut self, store: &mut Store) -> anyhow::Result<()> {
        let Some(entry) = self.current_entry() else {
            return Ok(());
        };
        let (id, word) = (entry.id, entry.word.clone());

        let result = store.toggle_favorite(id);
        self.refresh(store);

        match result? {
            Some(true) => self.set_status(format!("Added '{}' to favorites", word)),
            Some(false) => self.set_status(format!("Removed '{}' from favorites", word)),
            None => self.set_status("Entry no longer exists"),
        }
        Ok(())
    }

    /// Replace the note on the selected entry
    pub fn set_note_on_current(&mut self, store: &mut Store, text: &str) -> anyhow::Result<()> {
        let Some(entry) = self.current_entry() else {
            return Ok(());
        };
        let id = entry.id;

        let result = store.set_note(id, text);
        self.refresh(store);
        result?;

        if text.trim().is_empty() {
            self.set_status("Note cleared");
        } else {
            self.set_status("Note saved");
        }
        Ok(())
    }

    /// Ask before deleting the selected entry
    pub fn request_delete(&mut self) {
        if self.current_entry().is_some() {
            self.input_mode = InputMode::ConfirmDelete;
        }
    }

    /// Delete the selected entry after confirmation
    pub fn confirm_delete(&mut self, store: &mut Store) -> anyhow::Result<()> {
        self.input_mode = InputMode::Normal;

        let Some(entry) = self.current_entry() else {
            return Ok(());
        };
        let id = entry.id;

        let result = store.delete(id);
        self.refresh(store);

        if let Some(removed) = result? {
            self.set_status(format!("Deleted '{}'", removed.word));
        }
        Ok(())
    }

    /// Keep the entry
    pub fn cancel_delete(&mut self) {
        self.input_mode = InputMode::Normal;
        self.set_status("Delete cancelled");
    }
}
