//! History listing

use anyhow::Result;

use lugat_core::Store;

use crate::output::Output;

/// List history, newest first, or only the favorites
pub fn list(store: &Store, favorites_only: bool, output: &Output) -> Result<()> {
    if favorites_only {
        output.print_entries(&store.favorites(), "No favorites yet.")
    } else {
        let entries: Vec<_> = store.entries().iter().collect();
        output.print_entries(&entries, "No lookups yet.")
    }
}
