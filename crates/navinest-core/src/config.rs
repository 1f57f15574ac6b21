//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/navinest/config.toml)
//! 3. Environment variables (NAVINEST_* prefix)
//!
//! Environment variables take precedence over config file values.
//!
//! This is the *application* configuration (where data lives, which chat
//! endpoint to use) - not the dashboard document itself.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "NAVINEST";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for data storage (dashboard document, API key)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Chat completion endpoint (overrides the document's aiConfig)
    #[serde(default)]
    pub chat_url: Option<String>,

    /// Chat model name (overrides the document's aiConfig)
    #[serde(default)]
    pub chat_model: Option<String>,

    /// Log file path (stderr if not set)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            chat_url: None,
            chat_model: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (NAVINEST_DATA_DIR, NAVINEST_CHAT_URL, NAVINEST_CHAT_MODEL)
    /// 2. Config file (~/.config/navinest/config.toml or NAVINEST_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // NAVINEST_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // NAVINEST_CHAT_URL
        if let Ok(val) = std::env::var(format!("{}_CHAT_URL", ENV_PREFIX)) {
            self.chat_url = if val.is_empty() { None } else { Some(val) };
        }

        // NAVINEST_CHAT_MODEL
        if let Ok(val) = std::env::var(format!("{}_CHAT_MODEL", ENV_PREFIX)) {
            self.chat_model = if val.is_empty() { None } else { Some(val) };
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to the default config file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with NAVINEST_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("navinest")
            .join("config.toml")
    }

    /// Get the path to the dashboard document file
    pub fn dashboard_path(&self) -> PathBuf {
        self.data_dir.join("dashboard.json")
    }

    /// Get the path to the stored API key
    pub fn api_key_path(&self) -> PathBuf {
        self.data_dir.join("api_key")
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("navinest")
}
