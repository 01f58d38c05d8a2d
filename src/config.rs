//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    ALLOWED_SAVED_CAPACITIES, CONFIG_DIR_ENV, CONFIG_DIR_NAME, DEFAULT_PALETTE_SIZE,
    DEFAULT_SAVED_CAPACITY, MAX_PALETTE_SIZE,
};
use crate::models::GenerationMode;

/// Palette generation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Mode used when none is given
    pub default_mode: GenerationMode,
    /// Palette size used when none is given
    pub default_count: usize,
    /// Largest palette size accepted
    pub max_count: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_mode: GenerationMode::default(),
            default_count: DEFAULT_PALETTE_SIZE,
            max_count: MAX_PALETTE_SIZE,
        }
    }
}

/// Saved palette storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Number of saved palettes kept (5 or 10)
    pub saved_capacity: usize,
    /// Store file location; defaults to `palettes.json` in the config directory
    pub store_file: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            saved_capacity: DEFAULT_SAVED_CAPACITY,
            store_file: None,
        }
    }
}

/// Auto-regenerate settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoConfig {
    /// Seconds between automatic regenerations
    pub interval_secs: u64,
}

impl Default for AutoConfig {
    fn default() -> Self {
        Self { interval_secs: 3 }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/palettegen/config.toml`
/// - macOS: `~/Library/Application Support/palettegen/config.toml`
/// - Windows: `%APPDATA%\palettegen\config.toml`
///
/// `PALETTEGEN_CONFIG_DIR` overrides the directory.
///
/// # Validation
///
/// - `max_count` must be between 1 and 10
/// - `default_count` must be between 1 and `max_count`
/// - `saved_capacity` must be 5 or 10
/// - `interval_secs` must be at least 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Generation defaults
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Saved palette storage
    #[serde(default)]
    pub storage: StorageConfig,
    /// Auto-regenerate timer
    #[serde(default)]
    pub auto: AutoConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// Uses `PALETTEGEN_CONFIG_DIR` when set, otherwise the platform config
    /// directory joined with `palettegen`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Location of the saved palettes store.
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.storage.store_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("palettes.json")),
        }
    }

    /// Interval between automatic regenerations.
    #[must_use]
    pub const fn auto_interval(&self) -> Duration {
        Duration::from_secs(self.auto.interval_secs)
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to a specific file using temp file + rename.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let generation = &self.generation;
        if generation.max_count == 0 || generation.max_count > MAX_PALETTE_SIZE {
            anyhow::bail!(
                "max_count must be between 1 and {MAX_PALETTE_SIZE}, got {}",
                generation.max_count
            );
        }

        if generation.default_count == 0 || generation.default_count > generation.max_count {
            anyhow::bail!(
                "default_count must be between 1 and {}, got {}",
                generation.max_count,
                generation.default_count
            );
        }

        if !ALLOWED_SAVED_CAPACITIES.contains(&self.storage.saved_capacity) {
            anyhow::bail!(
                "saved_capacity must be one of {:?}, got {}",
                ALLOWED_SAVED_CAPACITIES,
                self.storage.saved_capacity
            );
        }

        if self.auto.interval_secs == 0 {
            anyhow::bail!("interval_secs must be at least 1");
        }

        Ok(())
    }
}
