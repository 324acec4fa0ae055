//! Storage layer
//!
//! The history lives in a single JSON file. Writes go to a temp file in the
//! same directory and are renamed over the target, so a reader never sees a
//! half-written document.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{atomic_write, JsonPersistence, LoadOutcome, StorageStats};
