//! Lookup command handlers

use anyhow::{bail, Context, Result};

use lugat_core::{NavigationGate, NavigationOutcome, RecordOutcome, Rejection, Store};

use crate::browser::{self, Browser};
use crate::output::Output;

/// Look up a word on the dictionary site and record it
pub fn lookup(
    store: &mut Store,
    gate: &mut NavigationGate,
    browser: &mut dyn Browser,
    word: &str,
    no_open: bool,
    output: &Output,
) -> Result<()> {
    let Some(url) = store.config().lookup_url(word) else {
        bail!("Nothing to look up");
    };

    let outcome = if no_open {
        gate.on_navigation(store, &url)
            .context("Failed to save history")?
    } else {
        browser::visit(browser, gate, store, &url)?
    };

    report(store, outcome, &url, output)
}

/// Deliver a navigation event from an external browser
pub fn record(
    store: &mut Store,
    gate: &mut NavigationGate,
    url: &str,
    output: &Output,
) -> Result<()> {
    let outcome = gate
        .on_navigation(store, url)
        .context("Failed to save history")?;
    report(store, outcome, url, output)
}

/// Open the site home page (never recorded)
pub fn random(
    store: &mut Store,
    gate: &mut NavigationGate,
    browser: &mut dyn Browser,
    output: &Output,
) -> Result<()> {
    let home = store.config().home_url().to_string();
    browser::visit(browser, gate, store, &home)?;
    output.success(&format!("Opened {}", home));
    Ok(())
}

fn report(store: &Store, outcome: NavigationOutcome, url: &str, output: &Output) -> Result<()> {
    match outcome {
        NavigationOutcome::Recorded(RecordOutcome::Added(id)) => {
            if let Some(entry) = store.get(id) {
                output.success(&format!("Recorded '{}'", entry.word));
                if !output.is_json() {
                    output.print_entry(entry)?;
                }
            }
        }
        NavigationOutcome::Recorded(RecordOutcome::Rejected(Rejection::Duplicate(id))) => {
            let word = store.get(id).map(|e| e.word.as_str()).unwrap_or("?");
            output.message(&format!("Already in history: {}", word));
        }
        NavigationOutcome::Recorded(RecordOutcome::Rejected(rejection)) => {
            output.message(&format!("Not recorded ({}): {}", rejection, url));
        }
        NavigationOutcome::OffSite => {
            output.message(&format!("Not a lookup page: {}", url));
        }
        NavigationOutcome::Suppressed => {}
    }
    Ok(())
}
