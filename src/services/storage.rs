//! Saved palettes on top of a flat key-value store.
//!
//! The whole log lives under one key as a JSON array of palettes, each an
//! array of hex strings, most recent first.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::SAVED_PALETTES_KEY;
use crate::error::PaletteError;
use crate::models::Palette;

/// Minimal string key-value storage.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    /// Deletes `key`. Missing keys are not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store, useful for tests and one-shot sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// Every write goes through a temp file and a rename so the file is never
/// left half-written.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store reading and writing `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read store file: {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse store file: {}", self.path.display()))
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create store directory: {}", parent.display())
                })?;
            }
        }

        let content =
            serde_json::to_string_pretty(entries).context("Failed to serialize store")?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp store file: {}", temp_path.display())
        })?;
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!("Failed to rename temp store file to: {}", self.path.display())
        })?;

        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Capacity-bounded, most-recent-first log of saved palettes.
#[derive(Debug, Clone)]
pub struct SavedPalettes<S> {
    store: S,
    capacity: usize,
}

impl<S: KeyValueStore> SavedPalettes<S> {
    /// Log over `store` keeping at most `capacity` palettes.
    pub fn new(store: S, capacity: usize) -> Self {
        Self { store, capacity }
    }

    /// Maximum number of palettes kept.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Saved palettes, most recent first.
    pub fn load(&self) -> Result<Vec<Palette>> {
        let Some(raw) = self.store.get(SAVED_PALETTES_KEY)? else {
            return Ok(Vec::new());
        };
        let mut palettes: Vec<Palette> =
            serde_json::from_str(&raw).context("Failed to parse saved palettes")?;
        palettes.truncate(self.capacity);
        Ok(palettes)
    }

    /// Palette at `index` in the log.
    pub fn get(&self, index: usize) -> Result<Palette> {
        let palettes = self.load()?;
        let len = palettes.len();
        palettes
            .into_iter()
            .nth(index)
            .ok_or_else(|| PaletteError::IndexOutOfRange { index, len }.into())
    }

    /// Prepends a copy of `palette`, evicting the oldest entries past capacity.
    ///
    /// Returns the log after the save.
    pub fn save(&mut self, palette: &Palette) -> Result<Vec<Palette>> {
        let mut palettes = self.load()?;
        palettes.insert(0, palette.clone());
        let evicted = palettes.len().saturating_sub(self.capacity);
        palettes.truncate(self.capacity);
        self.write(&palettes)?;
        info!(colors = palette.len(), evicted, "saved palette");
        Ok(palettes)
    }

    /// Removes and returns the palette at `index`.
    pub fn delete(&mut self, index: usize) -> Result<Palette> {
        let mut palettes = self.load()?;
        if index >= palettes.len() {
            return Err(PaletteError::IndexOutOfRange {
                index,
                len: palettes.len(),
            }
            .into());
        }
        let removed = palettes.remove(index);
        self.write(&palettes)?;
        debug!(index, "deleted saved palette");
        Ok(removed)
    }

    /// Drops every saved palette.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(SAVED_PALETTES_KEY)
    }

    fn write(&mut self, palettes: &[Palette]) -> Result<()> {
        let raw = serde_json::to_string(palettes).context("Failed to serialize palettes")?;
        self.store.set(SAVED_PALETTES_KEY, raw)
    }
}
