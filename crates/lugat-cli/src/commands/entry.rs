//! Single-entry command handlers

use anyhow::{Context, Result};

use lugat_core::{NavigationGate, Store};

use super::resolve_entry;
use crate::browser::{self, Browser};
use crate::editor::{confirm, edit_note};
use crate::output::{short_id, Output};

/// How `note` obtains its text
pub enum NoteInput {
    Text(String),
    Clear,
    Editor,
}

/// Show a single entry
pub fn show(store: &Store, query: &str, output: &Output) -> Result<()> {
    let id = resolve_entry(store, query)?;
    let entry = store
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Entry not found: {}", query))?;
    output.print_entry(entry)
}

/// Re-open an entry in the browser without recording it again
pub fn open(
    store: &mut Store,
    gate: &mut NavigationGate,
    browser: &mut dyn Browser,
    query: &str,
    output: &Output,
) -> Result<()> {
    let id = resolve_entry(store, query)?;
    let (word, url) = match store.get(id) {
        Some(entry) => (entry.word.clone(), entry.url.clone()),
        None => anyhow::bail!("Entry not found: {}", query),
    };

    browser::revisit(browser, gate, store, &url)?;
    output.success(&format!("Opened '{}'", word));
    Ok(())
}

/// Toggle the favorite flag
pub fn star(store: &mut Store, query: &str, output: &Output) -> Result<()> {
    let id = resolve_entry(store, query)?;
    let is_favorite = store
        .toggle_favorite(id)
        .context("Failed to save favorite")?
        .ok_or_else(|| anyhow::anyhow!("Entry not found: {}", query))?;

    let word = store.get(id).map(|e| e.word.clone()).unwrap_or_default();
    if is_favorite {
        output.success(&format!("Added '{}' to favorites", word));
    } else {
        output.success(&format!("Removed '{}' from favorites", word));
    }
    Ok(())
}

/// Set, clear, or edit the note on an entry
pub fn note(store: &mut Store, query: &str, input: NoteInput, output: &Output) -> Result<()> {
    let id = resolve_entry(store, query)?;
    let (word, current) = match store.get(id) {
        Some(entry) => (entry.word.clone(), entry.notes.clone()),
        None => anyhow::bail!("Entry not found: {}", query),
    };

    let text = match input {
        NoteInput::Text(text) => text,
        NoteInput::Clear => String::new(),
        NoteInput::Editor => edit_note(&word, &current)?,
    };

    if text.trim() == current {
        output.message("Note unchanged.");
        return Ok(());
    }

    store.set_note(id, &text).context("Failed to save note")?;

    if text.trim().is_empty() {
        output.success(&format!("Cleared note on '{}'", word));
    } else {
        output.success(&format!("Saved note on '{}'", word));
    }
    Ok(())
}

/// Delete an entry (asks first unless `yes`)
pub fn delete(store: &mut Store, query: &str, yes: bool, output: &Output) -> Result<()> {
    let id = resolve_entry(store, query)?;
    let Some(entry) = store.get(id) else {
        anyhow::bail!("Entry not found: {}", query);
    };

    // Confirm deletion
    if !yes && output.should_prompt() {
        println!("Delete entry: {} - {}", short_id(entry), entry.word);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let removed = store.delete(id).context("Failed to delete entry")?;
    if let Some(removed) = removed {
        output.success(&format!("Deleted '{}'", removed.word));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::RecordingBrowser;
    use crate::output::OutputFormat;
    use lugat_core::{Config, EntryId, RecordOutcome};
    use tempfile::TempDir;

    fn setup() -> (Store, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        };
        (Store::open_with_config(config), temp_dir)
    }

    fn add(store: &mut Store, url: &str) -> EntryId {
        match store.record_lookup(url).unwrap() {
            RecordOutcome::Added(id) => id,
            other => panic!("not added: {:?}", other),
        }
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_star_toggles() {
        let (mut store, _temp) = setup();
        let id = add(&mut store, "https://lugatim.com/s/KALEM");

        star(&mut store, "kalem", &quiet()).unwrap();
        assert!(store.get(id).unwrap().is_favorite);

        star(&mut store, "kalem", &quiet()).unwrap();
        assert!(!store.get(id).unwrap().is_favorite);
    }

    #[test]
    fn test_note_text_and_clear() {
        let (mut store, _temp) = setup();
        let id = add(&mut store, "https://lugatim.com/s/KALEM");

        note(&mut store, "kalem", NoteInput::Text("  pen  ".into()), &quiet()).unwrap();
        assert_eq!(store.get(id).unwrap().notes, "pen");

        note(&mut store, "kalem", NoteInput::Clear, &quiet()).unwrap();
        assert!(store.get(id).unwrap().notes.is_empty());
    }

    #[test]
    fn test_delete_with_yes() {
        let (mut store, _temp) = setup();
        add(&mut store, "https://lugatim.com/s/KALEM");
        add(&mut store, "https://lugatim.com/s/DEFTER");

        delete(&mut store, "kalem", true, &quiet()).unwrap();

        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].word, "DEFTER");
    }

    #[test]
    fn test_delete_non_interactive_output_skips_prompt() {
        let (mut store, _temp) = setup();
        add(&mut store, "https://lugatim.com/s/KALEM");

        delete(&mut store, "kalem", false, &Output::new(OutputFormat::Json)).unwrap();
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_open_does_not_record_again() {
        let (mut store, _temp) = setup();
        let id = add(&mut store, "https://lugatim.com/s/KALEM");
        let mut gate = NavigationGate::from_config(store.config());
        let mut browser = RecordingBrowser::default();

        open(&mut store, &mut gate, &mut browser, &id.to_string(), &quiet()).unwrap();

        assert_eq!(browser.opened, vec!["https://lugatim.com/s/KALEM"]);
        assert_eq!(store.entries().len(), 1);
        assert!(!gate.is_suppressing());
    }

    #[test]
    fn test_unknown_entry_is_error() {
        let (mut store, _temp) = setup();
        assert!(show(&store, "yok", &quiet()).is_err());
        assert!(star(&mut store, "yok", &quiet()).is_err());
    }
}
