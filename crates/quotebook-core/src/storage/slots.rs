//! Key-value storage slots
//!
//! Quotebook state lives in a handful of named slots:
//! - `quotes` - the full quote list (durable)
//! - `lastCategory` - the selected category filter (durable)
//! - `lastQuoteIndex` - the last shown position (session only)
//!
//! Durable slots are JSON files under the data directory, written
//! atomically (write to temp file, then rename). Session slots are kept in
//! memory and disappear with the process.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::error::{StorageError, StorageResult};

/// Slot holding the serialized quote list
pub const SLOT_QUOTES: &str = "quotes";

/// Slot holding the last selected category
pub const SLOT_LAST_CATEGORY: &str = "lastCategory";

/// Session slot holding the last shown index
pub const SLOT_LAST_QUOTE_INDEX: &str = "lastQuoteIndex";

/// A named key-value store for raw string values
pub trait SlotStore: Send + Sync {
    /// Read a slot, returning `None` if it has never been written
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a slot, replacing any previous value
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a slot (no-op if absent)
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Keep a copy of a slot's current value so it survives a reset
    ///
    /// Returns where the copy went, if the backend keeps one.
    fn backup(&self, _key: &str) -> StorageResult<Option<PathBuf>> {
        Ok(None)
    }

    /// Read a slot and decode it as JSON
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>>
    where
        Self: Sized,
    {
        read_json(self, key)
    }

    /// Encode a value as JSON and write it to a slot
    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()>
    where
        Self: Sized,
    {
        write_json(self, key, value)
    }
}

/// Read a slot and decode it as JSON (works on trait objects)
pub fn read_json<T: DeserializeOwned>(
    slots: &(impl SlotStore + ?Sized),
    key: &str,
) -> StorageResult<Option<T>> {
    let Some(raw) = slots.read(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::InvalidFormat {
            key: key.to_string(),
            details: e.to_string(),
        })
}

/// Encode a value as JSON and write it to a slot (works on trait objects)
pub fn write_json<T: Serialize>(
    slots: &(impl SlotStore + ?Sized),
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::InvalidFormat {
        key: key.to_string(),
        details: e.to_string(),
    })?;
    slots.write(key, &raw)
}

/// Durable slots backed by one JSON file per key
#[derive(Debug, Clone)]
pub struct FileSlots {
    dir: PathBuf,
}

impl FileSlots {
    /// Create slots rooted at the given directory
    ///
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing a slot
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SlotStore for FileSlots {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StorageError::reading(path, e))
    }

    /// Copies the slot file to `<key>.json.corrupt.backup`
    fn backup(&self, key: &str) -> StorageResult<Option<PathBuf>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let backup_path = path.with_extension("json.corrupt.backup");
        fs::copy(&path, &backup_path).map_err(|e| StorageError::writing(&backup_path, e))?;
        Ok(Some(backup_path))
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        debug!(slot = key, bytes = value.len(), "writing slot");
        atomic_write(&path, value.as_bytes())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| StorageError::writing(path, e))?;
        }
        Ok(())
    }
}

/// Session slots held in memory for the life of the process
#[derive(Debug, Default)]
pub struct MemorySlots {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map still holds valid strings
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SlotStore for MemorySlots {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::writing(&temp_path, e))?;
    file.write_all(data)
        .map_err(|e| StorageError::writing(&temp_path, e))?;
    file.sync_all()
        .map_err(|e| StorageError::writing(&temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source,
    })
}
