//! Configuration management for agent-picker

use crate::paths;
use crate::selection::{DEFAULT_STORAGE_KEY, SelectionOptions, SelectionPolicy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Key of the persisted slot holding the selected agent id
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Whether selecting an unregistered agent id is allowed
    #[serde(default)]
    pub policy: SelectionPolicy,

    /// Where the selection is stored (defaults to the local data dir)
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Event poll interval of the interactive picker, in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

const fn default_tick_rate() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            policy: SelectionPolicy::default(),
            store_path: None,
            tick_rate_ms: default_tick_rate(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or the defaults when it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if reading or parsing an existing config file fails
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        paths::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("agent-picker")
            .join("config.json")
    }

    /// Get the default selection store path
    #[must_use]
    pub fn default_store_path() -> PathBuf {
        paths::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("agent-picker")
            .join("selection.json")
    }

    /// Store path in effect: the configured one, else the default
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(Self::default_store_path)
    }

    /// Options for a [`SelectionStore`](crate::selection::SelectionStore)
    #[must_use]
    pub fn selection_options(&self) -> SelectionOptions {
        SelectionOptions {
            storage_key: self.storage_key.clone(),
            policy: self.policy,
            ..SelectionOptions::default()
        }
    }
}
