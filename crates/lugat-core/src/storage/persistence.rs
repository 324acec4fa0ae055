//! History document persistence
//!
//! Handles saving and loading the history document to/from the filesystem.
//! Uses atomic writes (write to temp file, then rename) to prevent corruption.
//!
//! Storage location: `~/.local/share/lugat/lugatim_data.json` (configurable
//! via `Config`)

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::document::Document;
use crate::storage::error::{StorageError, StorageResult};

/// Suffix of the copy kept when the history file cannot be parsed
const CORRUPT_BACKUP_SUFFIX: &str = "corrupt.bak";

/// Result of loading the history file
///
/// Loading never fails: an unreadable file yields an empty document and a
/// warning for the caller to report.
#[derive(Debug)]
pub struct LoadOutcome {
    pub document: Document,
    pub warning: Option<StorageError>,
}

/// On-disk size information for the history file
#[derive(Debug, Clone, Default)]
pub struct StorageStats {
    pub path: PathBuf,
    pub exists: bool,
    pub size: u64,
}

impl StorageStats {
    /// Size in human-readable units
    pub fn size_human(&self) -> String {
        let size = self.size as f64;
        if size < 1024.0 {
            format!("{} B", self.size)
        } else if size < 1024.0 * 1024.0 {
            format!("{:.1} KB", size / 1024.0)
        } else {
            format!("{:.1} MB", size / (1024.0 * 1024.0))
        }
    }
}

/// Persistence layer for the history document
pub struct JsonPersistence {
    path: PathBuf,
}

impl JsonPersistence {
    /// Create a persistence handler for the configured data file
    pub fn new(config: &Config) -> Self {
        Self::with_path(config.data_path())
    }

    /// Create a persistence handler for an explicit file path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the history file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if a history file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Save the document using an atomic write
    ///
    /// The target file is either the previous content or the complete new
    /// content, never a partial write.
    pub fn save(&self, doc: &Document) -> StorageResult<()> {
        let json = doc.to_json_pretty()?;
        atomic_write(&self.path, json.as_bytes())?;
        debug!("Saved {} entries to {:?}", doc.len(), self.path);
        Ok(())
    }

    /// Read the document from disk
    ///
    /// Returns `None` if the file doesn't exist.
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn read(&self) -> StorageResult<Option<Document>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes =
            fs::read(&self.path).map_err(|e| StorageError::from_read(e, self.path.clone()))?;

        // Invalid UTF-8 is a damaged document, not an I/O failure
        let content = String::from_utf8(bytes).map_err(|e| StorageError::InvalidFormat {
            path: self.path.clone(),
            details: e.to_string(),
        })?;

        // Tolerate a UTF-8 byte order mark
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

        let doc = Document::from_json(content).map_err(|e| StorageError::InvalidFormat {
            path: self.path.clone(),
            details: e.to_string(),
        })?;

        Ok(Some(doc))
    }

    /// Load the document, falling back to an empty one
    ///
    /// - Missing file: empty document, no warning.
    /// - Unreadable file: empty document, warning.
    /// - Unparsable file (including invalid UTF-8): empty document, warning;
    ///   the file is left in place and copied to `<file>.corrupt.bak` when
    ///   possible.
    /// - Entries repeating an earlier word are dropped, with a warning.
    pub fn load(&self) -> LoadOutcome {
        match self.read() {
            Ok(Some(mut document)) => {
                let dropped = document.dedup_urls();
                let warning = (dropped > 0).then(|| StorageError::DuplicatesDropped {
                    path: self.path.clone(),
                    count: dropped,
                });
                if let Some(warning) = &warning {
                    warn!("{}", warning);
                }
                LoadOutcome { document, warning }
            }
            Ok(None) => LoadOutcome {
                document: Document::new(),
                warning: None,
            },
            Err(StorageError::InvalidFormat { path, details }) => {
                let warning = match self.backup_corrupt() {
                    Ok(backup_path) => StorageError::CorruptDocument {
                        path,
                        backup_path,
                        details,
                    },
                    Err(e) => {
                        warn!("Could not copy unreadable history file aside: {}", e);
                        StorageError::InvalidFormat { path, details }
                    }
                };
                warn!("{}", warning);
                LoadOutcome {
                    document: Document::new(),
                    warning: Some(warning),
                }
            }
            Err(e) => {
                warn!("{}", e);
                LoadOutcome {
                    document: Document::new(),
                    warning: Some(e),
                }
            }
        }
    }

    /// Size information for status output
    pub fn stats(&self) -> StorageStats {
        let size = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        StorageStats {
            path: self.path.clone(),
            exists: self.exists(),
            size,
        }
    }

    /// Path used for the copy of an unparsable file
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(CORRUPT_BACKUP_SUFFIX);
        self.path.with_file_name(name)
    }

    fn backup_corrupt(&self) -> std::io::Result<PathBuf> {
        let backup = self.backup_path();
        fs::copy(&self.path, &backup)?;
        Ok(backup)
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
pub fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let temp_path = temp_path_for(path);

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        StorageError::AtomicWriteFailed {
            from: temp_path.clone(),
            to: path.to_path_buf(),
            source: e,
        }
    })?;

    Ok(())
}

/// `<file>.tmp` next to the target, never the target itself
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
