use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::api::PhraseClient;
use crate::api::client::{DEFAULT_API_URL, DEFAULT_LIMIT, DEFAULT_TIMEOUT_SECS};

/// Environment variable that overrides the configured API address
pub const API_URL_ENV: &str = "FRAZEO_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub default_category: Option<String>,
    pub phrase_limit: Option<u32>,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(base.join("frazeo"))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            Self::from_toml(&content)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config file")
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let dir = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Config path has no parent directory"))?;

        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&path, &content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// API address: environment first, then the config file, then the default
    pub fn api_url(&self) -> String {
        env_api_url()
            .or_else(|| non_blank(self.api_base_url.clone()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn limit(&self) -> u32 {
        self.phrase_limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|t| *t > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Build an API client from these settings
    pub fn client(&self) -> Result<PhraseClient> {
        PhraseClient::new(self.api_url(), self.timeout()).context("Failed to create HTTP client")
    }
}

/// The address set through `FRAZEO_API_URL`, ignoring a blank value
pub fn env_api_url() -> Option<String> {
    non_blank(std::env::var(API_URL_ENV).ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
