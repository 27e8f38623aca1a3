//! Configuration management for the DevFlow CLI
//!
//! Stores the backend base URL and the persisted request identity in
//! ~/.config/devflow/config.toml

use anyhow::{Context, Result};
use devflow_client::DidStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR: &str = "devflow";
const CONFIG_FILE: &str = "config.toml";

/// CLI Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Opaque identity sent as the request header after login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            did: None,
            username: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Store the identity returned by a successful login
    pub fn set_identity(&mut self, did: String, username: String) {
        self.did = Some(did);
        self.username = Some(username);
    }

    /// Discard the stored identity
    pub fn clear_identity(&mut self) {
        self.did = None;
        self.username = None;
    }
}

/// Identity source backed by the config file
///
/// Re-reads the file on every call so the header builder always sees the
/// value most recently written by `login`/`logout`.
#[derive(Debug, Clone, Default)]
pub struct FileDidStore;

impl DidStore for FileDidStore {
    fn current_did(&self) -> Option<String> {
        Config::load().ok().and_then(|config| config.did)
    }
}
