//! Browser hand-off
//!
//! The dictionary pages are rendered by the system browser. Every page the
//! shell opens is reported back to the navigation gate as if the browser had
//! emitted the event, so the gate sees the same traffic an embedded view
//! would produce.

use anyhow::{Context, Result};
use lugat_core::{NavigationGate, NavigationOutcome, Store};

/// Something that can display a URL
pub trait Browser {
    fn open(&mut self, url: &str) -> Result<()>;
}

/// The platform's default browser
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&mut self, url: &str) -> Result<()> {
        // Detached with null stdio so the TUI keeps the terminal
        open::that_detached(url).with_context(|| format!("Failed to open browser for {}", url))
    }
}

/// Navigate at the user's request; lookup pages are recorded
pub fn visit(
    browser: &mut dyn Browser,
    gate: &mut NavigationGate,
    store: &mut Store,
    url: &str,
) -> Result<NavigationOutcome> {
    browser.open(url)?;
    Ok(gate.on_navigation(store, url)?)
}

/// Re-open a stored entry without recording it again
pub fn revisit(
    browser: &mut dyn Browser,
    gate: &mut NavigationGate,
    store: &mut Store,
    url: &str,
) -> Result<NavigationOutcome> {
    browser.open(url)?;
    // Only arm the gate once the browser is actually navigating
    gate.begin_programmatic();
    Ok(gate.on_navigation(store, url)?)
}

/// Browser that remembers what it was asked to open
#[cfg(test)]
#[derive(Default)]
pub struct RecordingBrowser {
    pub opened: Vec<String>,
    pub fail: bool,
}

#[cfg(test)]
impl Browser for RecordingBrowser {
    fn open(&mut self, url: &str) -> Result<()> {
        if self.fail {
            anyhow::bail!("no browser available");
        }
        self.opened.push(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lugat_core::Config;
    use tempfile::TempDir;

    fn setup() -> (Store, NavigationGate, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        };
        let gate = NavigationGate::from_config(&config);
        (Store::open_with_config(config), gate, temp_dir)
    }

    #[test]
    fn test_visit_records_lookup() {
        let (mut store, mut gate, _temp) = setup();
        let mut browser = RecordingBrowser::default();

        let outcome = visit(&mut browser, &mut gate, &mut store, "https://lugatim.com/s/KALEM")
            .unwrap();

        assert!(outcome.is_added());
        assert_eq!(browser.opened, vec!["https://lugatim.com/s/KALEM"]);
    }

    #[test]
    fn test_visit_home_page_is_not_recorded() {
        let (mut store, mut gate, _temp) = setup();
        let mut browser = RecordingBrowser::default();

        let outcome = visit(&mut browser, &mut gate, &mut store, "https://lugatim.com").unwrap();

        assert_eq!(outcome, NavigationOutcome::OffSite);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_revisit_is_suppressed_and_gate_rearmed() {
        let (mut store, mut gate, _temp) = setup();
        let mut browser = RecordingBrowser::default();
        visit(&mut browser, &mut gate, &mut store, "https://lugatim.com/s/KALEM").unwrap();

        let outcome =
            revisit(&mut browser, &mut gate, &mut store, "https://lugatim.com/s/KALEM").unwrap();

        assert_eq!(outcome, NavigationOutcome::Suppressed);
        assert!(!gate.is_suppressing());
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn test_failed_open_leaves_gate_idle() {
        let (mut store, mut gate, _temp) = setup();
        let mut browser = RecordingBrowser {
            fail: true,
            ..Default::default()
        };

        assert!(revisit(&mut browser, &mut gate, &mut store, "https://lugatim.com/s/KALEM").is_err());
        assert!(!gate.is_suppressing());
        assert!(store.entries().is_empty());
    }
}
