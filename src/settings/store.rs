//! Key-value settings persistence.
//!
//! Settings live in a flat JSON object. Values are kept as
//! [`serde_json::Value`] so keys this crate does not know about survive a
//! load/flush cycle untouched.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FreshenError, Result};

/// Setting keys read and written by the update check.
pub mod keys {
    /// Master switch for update checks (bool).
    pub const CHECK_FOR_UPDATES: &str = "checkForUpdates";
    /// Epoch milliseconds of the last successful check (integer).
    pub const LAST_VERSION_CHECK: &str = "lastVersionCheck";
    /// Last version resolved from the registry (string).
    pub const NEWEST_VERSION: &str = "newestVersion";
}

/// Persistence collaborator for settings.
///
/// `set` and `remove` only change the in-memory view; nothing is durable
/// until `flush` returns `Ok`.
pub trait SettingsStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<Value>;

    /// Write a value.
    fn set(&mut self, key: &str, value: Value);

    /// Remove a value.
    fn remove(&mut self, key: &str);

    /// Durably persist all pending writes.
    fn flush(&mut self) -> Result<()>;
}

/// Settings stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
    values: Map<String, Value>,
    existed: bool,
}

impl FileSettingsStore {
    /// Open the settings file at `path`.
    ///
    /// A missing or empty file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            return Ok(Self {
                path,
                values: Map::new(),
                existed: false,
            });
        }

        let content = fs::read_to_string(&path)?;
        let values = if content.trim().is_empty() {
            Map::new()
        } else {
            serde_json::from_str::<Map<String, Value>>(&content).map_err(|e| {
                FreshenError::SettingsParseError {
                    path: path.clone(),
                    message: e.to_string(),
                }
            })?
        };

        Ok(Self {
            path,
            values,
            existed: true,
        })
    }

    /// Default settings location for a package.
    ///
    /// `<config dir>/freshen/<package>.json`, with `/` in scoped package
    /// names replaced so the name stays a single path component.
    pub fn default_path(package: &str) -> Option<PathBuf> {
        let file_name = format!("{}.json", package.replace('/', "__"));
        dirs::config_dir().map(|d| d.join("freshen").join(file_name))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file existed when opened (or has since been flushed).
    pub fn exists(&self) -> bool {
        self.existed
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    /// Write the file using the write-to-temp-then-rename pattern.
    fn flush(&mut self) -> Result<()> {
        let write_error = |e: std::io::Error| FreshenError::SettingsWriteError {
            path: self.path.clone(),
            message: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_error)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.values)
            .map_err(|e| anyhow::anyhow!("Failed to serialize settings: {}", e))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content).map_err(write_error)?;
        fs::rename(&temp_path, &self.path).map_err(write_error)?;

        self.existed = true;
        tracing::debug!("Flushed settings to {}", self.path.display());
        Ok(())
    }
}

/// In-memory settings for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    values: Map<String, Value>,
    flushes: usize,
    fail_flush: bool,
}

impl MemorySettingsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, builder style.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Make every `flush` fail.
    pub fn failing_flush(mut self) -> Self {
        self.fail_flush = true;
        self
    }

    /// Number of successful flushes.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn flush(&mut self) -> Result<()> {
        if self.fail_flush {
            return Err(FreshenError::SettingsWriteError {
                path: PathBuf::from("<memory>"),
                message: "flush disabled".to_string(),
            });
        }
        self.flushes += 1;
        Ok(())
    }
}
