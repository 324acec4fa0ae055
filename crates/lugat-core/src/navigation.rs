//! Navigation event gate
//!
//! Shells forward every "navigation changed" event here. The gate drops the
//! one event that follows a programmatic navigation (re-opening a history or
//! favorite entry), ignores pages outside the lookup section, and records the
//! rest.

use tracing::debug;

use crate::config::Config;
use crate::storage::StorageResult;
use crate::store::{RecordOutcome, Store};

/// What happened to a navigation event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Caused by the shell itself, not recorded
    Suppressed,
    /// Not a lookup page
    OffSite,
    /// Offered to the store
    Recorded(RecordOutcome),
}

impl NavigationOutcome {
    /// Whether the store gained an entry
    pub fn is_added(&self) -> bool {
        matches!(self, NavigationOutcome::Recorded(outcome) if outcome.is_added())
    }
}

/// Filters navigation events before they reach the store
#[derive(Debug, Clone)]
pub struct NavigationGate {
    marker: String,
    ignore_next: bool,
}

impl NavigationGate {
    /// Create a gate accepting URLs that contain `marker`
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into().to_lowercase(),
            ignore_next: false,
        }
    }

    /// Create a gate for the configured lookup section
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.lookup_marker())
    }

    /// Call right before the shell navigates on its own
    pub fn begin_programmatic(&mut self) {
        self.ignore_next = true;
    }

    /// Whether the next event will be dropped
    pub fn is_suppressing(&self) -> bool {
        self.ignore_next
    }

    /// Handle one navigation event
    pub fn on_navigation(
        &mut self,
        store: &mut Store,
        url: &str,
    ) -> StorageResult<NavigationOutcome> {
        // The flag is consumed even when the URL is not a lookup page
        if std::mem::take(&mut self.ignore_next) {
            debug!("Ignoring programmatic navigation to {:?}", url);
            return Ok(NavigationOutcome::Suppressed);
        }

        if !url.to_lowercase().contains(&self.marker) {
            debug!("Ignoring non-lookup navigation to {:?}", url);
            return Ok(NavigationOutcome::OffSite);
        }

        Ok(NavigationOutcome::Recorded(store.record_lookup(url)?))
    }
}
