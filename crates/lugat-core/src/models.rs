//! Data models for Lugat
//!
//! Defines the core data structure: `Entry`, one recorded dictionary lookup.
//! Field names are serialized in PascalCase (`Word`, `Url`, `IsFavorite`, ...),
//! which is the on-disk format of `lugatim_data.json`.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Handle used by shells to refer to a stored entry
pub type EntryId = Uuid;

/// Glyph shown for a favorited entry
pub const FAVORITE_ICON: &str = "★";

/// Glyph shown for an entry that is not a favorite
pub const NOT_FAVORITE_ICON: &str = "☆";

/// A recorded dictionary lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Entry {
    /// Session-independent handle (not part of the lookup identity)
    #[serde(default = "Uuid::new_v4")]
    pub id: EntryId,
    /// Decoded lookup term, derived once from the URL
    pub word: String,
    /// Navigation URL that produced this entry
    pub url: String,
    /// When the lookup was recorded
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Local>,
    /// Whether the entry is starred
    #[serde(default)]
    pub is_favorite: bool,
    /// Free-text note, empty when unset
    #[serde(default)]
    pub notes: String,
}

impl Entry {
    /// Create a new entry recorded now
    pub fn new(word: impl Into<String>, url: impl Into<String>) -> Self {
        Self::with_timestamp(word, url, Local::now())
    }

    /// Create an entry with a specific creation time
    pub fn with_timestamp(
        word: impl Into<String>,
        url: impl Into<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            word: word.into(),
            url: url.into(),
            timestamp,
            is_favorite: false,
            notes: String::new(),
        }
    }

    /// Flip the favorite flag, returning the new value
    pub fn toggle_favorite(&mut self) -> bool {
        self.is_favorite = !self.is_favorite;
        self.is_favorite
    }

    /// Replace the note with the trimmed text (empty clears it)
    pub fn set_note(&mut self, text: &str) {
        self.notes = text.trim().to_string();
    }

    /// Glyph reflecting the favorite flag
    pub fn favorite_icon(&self) -> &'static str {
        if self.is_favorite {
            FAVORITE_ICON
        } else {
            NOT_FAVORITE_ICON
        }
    }

    /// Whether the note panel should be shown for this entry
    pub fn has_note(&self) -> bool {
        !self.notes.trim().is_empty()
    }
}

/// RFC 3339 timestamps; offset-less values are read as local time
mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Local>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Local>, D::Error> {
        let raw = String::deserialize(deserializer)?;

        if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(parsed.with_timezone(&Local));
        }

        let naive = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| de::Error::custom(format!("nonexistent local time '{}'", raw)))
    }
}
