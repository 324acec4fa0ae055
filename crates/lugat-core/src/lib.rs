//! Lugat Core Library
//!
//! This crate provides the core functionality for Lugat, a lookup history
//! for the lugatim.com dictionary: every distinct lookup is recorded, can be
//! starred as a favorite, annotated with a note, or deleted.
//!
//! # Architecture
//!
//! - **Document**: one ordered list of entries, newest first, persisted as a
//!   single JSON file
//! - **Store**: the only owner of the document; every mutation saves
//! - **NavigationGate**: turns browser navigation events into lookups
//!
//! The favorites view is derived from the document on every read.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//! let mut gate = NavigationGate::from_config(store.config());
//!
//! gate.on_navigation(&mut store, "https://lugatim.com/s/KALEM")?;
//!
//! let favorites = store.favorites();
//! ```
//!
//! # Modules
//!
//! - `store`: Unified storage interface (main entry point)
//! - `models`: The `Entry` data structure
//! - `document`: The ordered history aggregate
//! - `lookup`: Word extraction and dedup rules for lookup URLs
//! - `navigation`: Navigation event gate
//! - `storage`: JSON persistence and storage errors
//! - `config`: Application configuration

pub mod config;
pub mod document;
pub mod lookup;
pub mod models;
pub mod navigation;
pub mod storage;
pub mod store;

pub use config::Config;
pub use document::Document;
pub use lookup::Rejection;
pub use models::{Entry, EntryId};
pub use navigation::{NavigationGate, NavigationOutcome};
pub use storage::{JsonPersistence, LoadOutcome, StorageError, StorageResult, StorageStats};
pub use store::{RecordOutcome, Store};
