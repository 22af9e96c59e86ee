//! Configuration for the gotoxy command-line tool.
//!
//! The configuration file is located at `~/.gotoxy/config.toml`:
//!
//! ```toml
//! [log]
//! # trace, debug, info, warn, error or off
//! level = "info"
//! # Log file (default: ~/.gotoxy/gotoxy.log)
//! file = "/tmp/gotoxy.log"
//! ```
//!
//! A missing or unreadable file falls back to the defaults.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings
    pub log: LogConfig,
}

/// Log configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Self {
        if let Ok(content) = fs::read_to_string(path) {
            if let Ok(config) = toml::from_str(&content) {
                return config;
            }
        }
        Self::default()
    }

    /// Save configuration to file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }
        fs::write(path, content)
            .map_err(|e| format!("Failed to write config: {}", e))?;
        Ok(())
    }

    /// Get config file path
    pub fn get_config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Log file path, explicit or under the config directory
    pub fn log_path(&self) -> PathBuf {
        if let Some(ref file) = self.log.file {
            return file.clone();
        }
        config_dir()
            .map(|dir| dir.join("gotoxy.log"))
            .unwrap_or_else(|| PathBuf::from("gotoxy.log"))
    }
}

/// `~/.gotoxy`
fn config_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".gotoxy"))
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}
