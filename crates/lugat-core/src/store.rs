//! Unified storage interface
//!
//! The `Store` owns the history document and its persistence. Every
//! mutation is applied in memory first and then saved; a failed save is
//! returned to the caller and the in-memory change stays applied.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;  // Creates or loads existing
//!
//! if store.record_lookup("https://lugatim.com/s/KALEM")?.is_added() {
//!     // refresh views
//! }
//!
//! let favorites = store.favorites();
//! ```

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::document::Document;
use crate::lookup::{extract_word, Rejection};
use crate::models::{Entry, EntryId};
use crate::storage::{JsonPersistence, StorageError, StorageResult, StorageStats};

/// Result of offering a navigation URL to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new entry was inserted at the front
    Added(EntryId),
    /// Nothing changed
    Rejected(Rejection),
}

impl RecordOutcome {
    /// Whether an entry was actually added
    pub fn is_added(&self) -> bool {
        matches!(self, RecordOutcome::Added(_))
    }
}

/// Single source of truth for lookup history
pub struct Store {
    /// The history document
    doc: Document,
    /// JSON persistence handler
    persistence: JsonPersistence,
    /// Configuration
    config: Config,
    /// Problem found while loading, if any
    load_warning: Option<StorageError>,
}

impl Store {
    /// Open the store using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Ok(Self::open_with_config(config))
    }

    /// Open the store with a specific configuration
    ///
    /// Never fails: an unreadable history file yields an empty document and
    /// a warning available through `load_warning()`.
    pub fn open_with_config(config: Config) -> Self {
        let persistence = JsonPersistence::new(&config);
        let outcome = persistence.load();

        if let Some(warning) = &outcome.warning {
            warn!("History loaded with a warning: {}", warning);
        }
        info!(
            "Opened history at {:?} ({} entries)",
            persistence.path(),
            outcome.document.len()
        );

        Self {
            doc: outcome.document,
            persistence,
            config,
            load_warning: outcome.warning,
        }
    }

    /// Warning raised while loading, if the file could not be used
    pub fn load_warning(&self) -> Option<&StorageError> {
        self.load_warning.as_ref()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read-only view of the document
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// All entries, newest first
    pub fn entries(&self) -> &[Entry] {
        self.doc.entries()
    }

    /// Favorited entries in history order
    pub fn favorites(&self) -> Vec<&Entry> {
        self.doc.favorites()
    }

    /// Get an entry by ID
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.doc.get(id)
    }

    // ==================== Mutations ====================

    /// Record a navigation URL as a lookup
    ///
    /// Rejected URLs leave the document untouched and are not saved.
    pub fn record_lookup(&mut self, url: &str) -> StorageResult<RecordOutcome> {
        let word = match extract_word(url) {
            Ok(word) => word,
            Err(rejection) => {
                debug!("Not recording {:?}: {}", url, rejection);
                return Ok(RecordOutcome::Rejected(rejection));
            }
        };

        if let Some(existing) = self.doc.find_by_url(url) {
            debug!("Not recording {:?}: same as {:?}", url, existing.url);
            return Ok(RecordOutcome::Rejected(Rejection::Duplicate(existing.id)));
        }

        let entry = Entry::new(word, url);
        let id = entry.id;
        info!("Recorded lookup {:?}", entry.word);
        self.doc.insert_front(entry);
        self.save()?;

        Ok(RecordOutcome::Added(id))
    }

    /// Flip the favorite flag, returning the new value
    ///
    /// Returns `None` without saving if the entry is gone.
    pub fn toggle_favorite(&mut self, id: EntryId) -> StorageResult<Option<bool>> {
        let Some(entry) = self.doc.get_mut(id) else {
            debug!("Toggle favorite on missing entry {}", id);
            return Ok(None);
        };

        let is_favorite = entry.toggle_favorite();
        info!("Favorite {:?} = {}", entry.word, is_favorite);
        self.save()?;

        Ok(Some(is_favorite))
    }

    /// Replace an entry's note with the trimmed text
    ///
    /// Returns `false` without saving if the entry is gone.
    pub fn set_note(&mut self, id: EntryId, text: &str) -> StorageResult<bool> {
        let Some(entry) = self.doc.get_mut(id) else {
            debug!("Set note on missing entry {}", id);
            return Ok(false);
        };

        entry.set_note(text);
        info!(
            "Note on {:?} {}",
            entry.word,
            if entry.has_note() { "updated" } else { "cleared" }
        );
        self.save()?;

        Ok(true)
    }

    /// Delete an entry, returning it
    ///
    /// Returns `None` without saving if the entry is gone.
    pub fn delete(&mut self, id: EntryId) -> StorageResult<Option<Entry>> {
        let Some(removed) = self.doc.remove(id) else {
            debug!("Delete on missing entry {}", id);
            return Ok(None);
        };

        info!("Deleted {:?}", removed.word);
        self.save()?;

        Ok(Some(removed))
    }

    // ==================== Persistence ====================

    /// Write the current document to disk
    pub fn save(&self) -> StorageResult<()> {
        self.persistence.save(&self.doc)
    }

    /// Replace the in-memory document with what is on disk
    pub fn reload(&mut self) {
        let outcome = self.persistence.load();
        if let Some(warning) = &outcome.warning {
            warn!("History reloaded with a warning: {}", warning);
        }
        self.doc = outcome.document;
        self.load_warning = outcome.warning;
    }

    /// Get storage statistics
    pub fn storage_stats(&self) -> StorageStats {
        self.persistence.stats()
    }
}
