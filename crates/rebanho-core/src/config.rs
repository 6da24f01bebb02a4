//! Application configuration management.
//!
//! This module handles loading and saving the client configuration,
//! which includes the API base URL override and the last identifier
//! used to log in.
//!
//! Configuration is stored at `~/.config/rebanho/config.json`; the
//! `REBANHO_API_URL` environment variable overrides the base URL.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
const APP_NAME: &str = "rebanho";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Production API base URL
const DEFAULT_API_URL: &str = "https://api.rebanho.app";

/// Environment variable overriding the API base URL
const API_URL_ENV: &str = "REBANHO_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub base_url: Option<String>,
    pub last_identifier: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Resolve the API base URL: environment variable, then config file,
    /// then the production default.
    pub fn api_url(&self) -> String {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                return url;
            }
        }
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
