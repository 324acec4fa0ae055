//! Command handlers

pub mod config;
pub mod entry;
pub mod history;
pub mod lookup;
pub mod status;

use anyhow::{bail, Result};
use uuid::Uuid;

use lugat_core::{EntryId, Store};

/// Resolve an entry argument: full UUID, word, or UUID prefix
pub fn resolve_entry(store: &Store, query: &str) -> Result<EntryId> {
    let query = query.trim();
    if query.is_empty() {
        bail!("No entry given");
    }

    // Try full UUID first
    if let Ok(uuid) = Uuid::parse_str(query) {
        if store.get(uuid).is_some() {
            return Ok(uuid);
        }
        bail!("No entry with ID {}", uuid);
    }

    // Then the looked-up word
    let wanted = query.to_lowercase();
    let by_word: Vec<_> = store
        .entries()
        .iter()
        .filter(|e| e.word.to_lowercase() == wanted)
        .collect();
    if by_word.len() == 1 {
        return Ok(by_word[0].id);
    }

    // Finally an ID prefix
    let by_prefix: Vec<_> = if by_word.is_empty() {
        store
            .entries()
            .iter()
            .filter(|e| e.id.to_string().starts_with(&wanted))
            .collect()
    } else {
        by_word
    };

    match by_prefix.len() {
        0 => bail!("No entry found matching: {}", query),
        1 => Ok(by_prefix[0].id),
        _ => {
            eprintln!("Multiple entries match '{}':", query);
            for entry in &by_prefix {
                eprintln!("  {} - {}", entry.id, entry.word);
            }
            bail!("Ambiguous entry. Please use more characters of the ID.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lugat_core::Config;
    use tempfile::TempDir;

    fn setup_store() -> (Store, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        };
        (Store::open_with_config(config), temp_dir)
    }

    fn add(store: &mut Store, url: &str) -> EntryId {
        match store.record_lookup(url).unwrap() {
            lugat_core::RecordOutcome::Added(id) => id,
            other => panic!("not added: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_full_uuid() {
        let (mut store, _temp) = setup_store();
        let id = add(&mut store, "https://lugatim.com/s/KALEM");

        assert_eq!(resolve_entry(&store, &id.to_string()).unwrap(), id);
        assert!(resolve_entry(&store, &Uuid::new_v4().to_string()).is_err());
    }

    #[test]
    fn test_resolve_word_ignores_case() {
        let (mut store, _temp) = setup_store();
        let id = add(&mut store, "https://lugatim.com/s/KALEM");
        add(&mut store, "https://lugatim.com/s/DEFTER");

        assert_eq!(resolve_entry(&store, "kalem").unwrap(), id);
        assert_eq!(resolve_entry(&store, " KALEM ").unwrap(), id);
    }

    #[test]
    fn test_resolve_prefix() {
        let (mut store, _temp) = setup_store();
        let id = add(&mut store, "https://lugatim.com/s/KALEM");

        let prefix = &id.to_string()[..8];
        assert_eq!(resolve_entry(&store, prefix).unwrap(), id);
    }

    #[test]
    fn test_resolve_ambiguous_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let json = r#"{
          "History": [
            {"Id": "aaaaaaaa-0000-4000-8000-000000000001", "Word": "KALEM", "Url": "https://lugatim.com/s/KALEM", "Timestamp": "2024-03-02T10:00:00+03:00"},
            {"Id": "aaaaaaaa-0000-4000-8000-000000000002", "Word": "DEFTER", "Url": "https://lugatim.com/s/DEFTER", "Timestamp": "2024-03-01T10:00:00+03:00"}
          ]
        }"#;
        std::fs::write(temp_dir.path().join("lugatim_data.json"), json).unwrap();
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        };
        let store = Store::open_with_config(config);
        assert_eq!(store.entries().len(), 2);

        assert!(resolve_entry(&store, "aaaaaaaa").is_err());
        assert!(resolve_entry(&store, "aaaaaaaa-0000-4000-8000-000000000002").is_ok());
        assert!(resolve_entry(&store, "defter").is_ok());
    }

    #[test]
    fn test_resolve_missing() {
        let (store, _temp) = setup_store();
        assert!(resolve_entry(&store, "yok").is_err());
        assert!(resolve_entry(&store, "  ").is_err());
    }
}
