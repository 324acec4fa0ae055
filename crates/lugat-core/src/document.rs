//! The history document
//!
//! `Document` is the persisted aggregate: every recorded entry, newest first.
//! It enforces the ordering and dedup invariants; the favorites view is
//! derived from it on every read and never stored separately.

use serde::{Deserialize, Serialize};

use crate::lookup::dedup_key;
use crate::models::{Entry, EntryId};

/// Ordered collection of lookup entries (index 0 is the newest)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Document {
    #[serde(default)]
    history: Vec<Entry>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from entries already in display order
    ///
    /// Entries whose dedup key repeats an earlier one are dropped.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut doc = Self { history: entries };
        doc.dedup_urls();
        doc
    }

    /// Parse a document from JSON text
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize to indented JSON (non-ASCII is written unescaped)
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// All entries in display order
    pub fn entries(&self) -> &[Entry] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Get an entry by ID
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.history.iter().find(|e| e.id == id)
    }

    /// Get a mutable entry by ID
    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut Entry> {
        self.history.iter_mut().find(|e| e.id == id)
    }

    /// Index of an entry in display order
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.history.iter().position(|e| e.id == id)
    }

    /// Find the entry whose URL has the same dedup key
    pub fn find_by_url(&self, url: &str) -> Option<&Entry> {
        let key = dedup_key(url);
        self.history.iter().find(|e| dedup_key(&e.url) == key)
    }

    /// Insert a new entry at the front
    ///
    /// Callers must check `find_by_url` first; the store does.
    pub fn insert_front(&mut self, entry: Entry) {
        self.history.insert(0, entry);
    }

    /// Remove an entry, returning it if it was present
    pub fn remove(&mut self, id: EntryId) -> Option<Entry> {
        let index = self.position(id)?;
        Some(self.history.remove(index))
    }

    /// Favorited entries, in document order
    pub fn favorites(&self) -> Vec<&Entry> {
        self.history.iter().filter(|e| e.is_favorite).collect()
    }

    /// Number of favorited entries
    pub fn favorite_count(&self) -> usize {
        self.history.iter().filter(|e| e.is_favorite).count()
    }

    /// Drop entries that repeat an earlier dedup key, returning how many went
    pub fn dedup_urls(&mut self) -> usize {
        let before = self.history.len();
        let mut seen = std::collections::HashSet::new();
        self.history.retain(|e| seen.insert(dedup_key(&e.url)));
        before - self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str) -> Entry {
        Entry::new(word, format!("https://lugatim.com/s/{}", word))
    }

    #[test]
    fn test_new_document_is_empty() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
        assert!(doc.favorites().is_empty());
    }

    #[test]
    fn test_insert_front_orders_newest_first() {
        let mut doc = Document::new();
        doc.insert_front(entry("BIR"));
        doc.insert_front(entry("IKI"));
        doc.insert_front(entry("UC"));

        let words: Vec<_> = doc.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["UC", "IKI", "BIR"]);
    }

    #[test]
    fn test_get_and_position() {
        let mut doc = Document::new();
        let first = entry("BIR");
        let second = entry("IKI");
        let (first_id, second_id) = (first.id, second.id);
        doc.insert_front(first);
        doc.insert_front(second);

        assert_eq!(doc.position(second_id), Some(0));
        assert_eq!(doc.position(first_id), Some(1));
        assert_eq!(doc.get(first_id).unwrap().word, "BIR");
        assert!(doc.get(uuid::Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_find_by_url_is_case_insensitive() {
        let mut doc = Document::new();
        doc.insert_front(entry("KALEM"));

        assert!(doc.find_by_url("https://lugatim.com/s/kalem").is_some());
        assert!(doc.find_by_url("https://lugatim.com/s/KALEM/").is_some());
        assert!(doc.find_by_url("https://lugatim.com/s/KELAM").is_none());
    }

    #[test]
    fn test_remove() {
        let mut doc = Document::new();
        let e = entry("KALEM");
        let id = e.id;
        doc.insert_front(e);

        let removed = doc.remove(id).unwrap();
        assert_eq!(removed.word, "KALEM");
        assert!(doc.is_empty());
        assert!(doc.remove(id).is_none());
    }

    #[test]
    fn test_favorites_follow_document_order() {
        let mut doc = Document::new();
        let a = entry("A");
        let b = entry("B");
        let c = entry("C");
        let (a_id, c_id) = (a.id, c.id);
        doc.insert_front(a);
        doc.insert_front(b);
        doc.insert_front(c);

        // Star A before C; the view still lists C (newer) first
        doc.get_mut(a_id).unwrap().toggle_favorite();
        doc.get_mut(c_id).unwrap().toggle_favorite();

        let favorites: Vec<_> = doc.favorites().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(favorites, vec!["C", "A"]);
        assert_eq!(doc.favorite_count(), 2);
    }

    #[test]
    fn test_from_entries_drops_duplicates() {
        let newest = Entry::new("KALEM", "https://lugatim.com/s/KALEM");
        let older = Entry::new("kalem", "https://lugatim.com/s/kalem");
        let other = entry("DEFTER");

        let doc = Document::from_entries(vec![newest.clone(), older, other]);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.entries()[0], newest);
        assert_eq!(doc.entries()[1].word, "DEFTER");
    }

    #[test]
    fn test_json_shape() {
        let mut doc = Document::new();
        doc.insert_front(entry("KALEM"));

        let json = doc.to_json_pretty().unwrap();
        assert!(json.starts_with("{\n  \"History\": ["));

        let parsed = Document::from_json(&json).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_json_missing_history_is_empty() {
        let doc = Document::from_json("{}").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_json_keeps_non_ascii_unescaped() {
        let mut doc = Document::new();
        doc.insert_front(Entry::new(
            "GÜZEL SÖZ",
            "https://lugatim.com/s/G%C3%9CZEL%20S%C3%96Z",
        ));

        let json = doc.to_json_pretty().unwrap();
        assert!(json.contains("GÜZEL SÖZ"));
        assert!(!json.contains("\\u"));
    }
}
