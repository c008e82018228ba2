//! Settings store abstraction over the platform settings provider.
//!
//! The controller only ever reads and writes integer-encoded booleans by
//! string key, so the store surface is deliberately small. Two implementations
//! are provided: an in-memory store for tests and embedders with their own
//! persistence, and a JSON file backed store with atomic writes for hosts
//! without a platform provider.

use crate::error::Result;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Integer key-value settings store.
///
/// Absent keys are not errors; reads fall back to the caller's default.
/// Writes are best-effort from the controller's point of view: an
/// implementation that can fail persists what it can and logs the rest.
pub trait SettingsStore: Send + Sync {
    /// Read an integer setting, returning `default` when the key is absent
    fn get_int(&self, key: &str, default: i32) -> i32;

    /// Write an integer setting
    fn put_int(&self, key: &str, value: i32);
}

/// In-memory settings store
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: Mutex<HashMap<String, i32>>,
}

impl MemorySettingsStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.lock().get(key).copied().unwrap_or(default)
    }

    fn put_int(&self, key: &str, value: i32) {
        self.values.lock().insert(key.to_string(), value);
    }
}

/// JSON file backed settings store with atomic writes.
///
/// The backing file is loaded once at open; a missing or corrupt file falls
/// back to an empty map. Every write rewrites the file through a temp file
/// and rename so a crash never leaves a truncated store behind. Write
/// failures keep the in-memory value and log a warning.
pub struct FileSettingsStore {
    path: PathBuf,
    values: Mutex<HashMap<String, i32>>,
}

impl FileSettingsStore {
    /// Open a store backed by the given JSON file
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = Self::load(&path);
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    fn load(path: &Path) -> HashMap<String, i32> {
        if !path.exists() {
            info!("Settings file not found, starting empty: {}", path.display());
            return HashMap::new();
        }

        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(values) => {
                    info!("Settings loaded from {}", path.display());
                    values
                }
                Err(e) => {
                    warn!("Failed to parse settings file, starting empty: {}", e);
                    HashMap::new()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file, starting empty: {}", e);
                HashMap::new()
            }
        }
    }

    /// Atomic write: serialize to a temp file, then rename over the store file
    fn save(&self, values: &HashMap<String, i32>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(values)?;
        std::fs::write(&temp_path, json)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.lock().get(key).copied().unwrap_or(default)
    }

    fn put_int(&self, key: &str, value: i32) {
        let mut values = self.values.lock();
        values.insert(key.to_string(), value);

        // Persistence failure keeps the in-memory value; the change is lost on restart
        if let Err(e) = self.save(&values) {
            warn!(
                "Failed to save settings to {}: {}. Continuing with in-memory value.",
                self.path.display(),
                e
            );
        }
    }
}
