//! Status command handler

use anyhow::Result;

use lugat_core::Store;

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let stats = store.storage_stats();
    let config = store.config();
    let doc = store.document();
    let warning = store.load_warning().map(|w| w.to_string());

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "site_url": config.site_url,
                    "storage": {
                        "path": stats.path,
                        "exists": stats.exists,
                        "size": stats.size
                    },
                    "counts": {
                        "entries": doc.len(),
                        "favorites": doc.favorite_count(),
                        "notes": doc.entries().iter().filter(|e| e.has_note()).count()
                    },
                    "load_warning": warning
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", doc.len());
        }
        OutputFormat::Human => {
            println!("Lugat Status");
            println!("============");
            println!();
            println!("Dictionary: {}", config.site_url);
            println!();
            println!("Storage:");
            println!("  File: {}", stats.path.display());
            if stats.exists {
                println!("  Size: {}", stats.size_human());
            } else {
                println!("  Size: (not created yet)");
            }
            println!();
            println!("Contents:");
            println!("  Entries:   {}", doc.len());
            println!("  Favorites: {}", doc.favorite_count());
            println!(
                "  Notes:     {}",
                doc.entries().iter().filter(|e| e.has_note()).count()
            );

            if let Some(err) = store.load_warning() {
                println!();
                println!("Warning: {}", err);
                if let Some(hint) = err.recovery_suggestion() {
                    println!("  {}", hint);
                }
            }
        }
    }

    Ok(())
}
