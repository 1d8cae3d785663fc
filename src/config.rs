use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::address::Strictness;
use crate::network::{DEFAULT_ADDRESS, DEFAULT_ORIGIN, DEFAULT_TX_LIMIT};

/// Environment variable that overrides `backend_url`
pub const BACKEND_URL_ENV: &str = "CHAINBOARD_BACKEND_URL";

const MAX_RECENT: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend root; the API lives under `{backend_url}/api`
    pub backend_url: Option<String>,
    /// Origin a relative API base is resolved against
    pub origin: String,
    pub default_address: String,
    pub tx_limit: usize,
    pub strictness: Strictness,
    pub request_timeout_secs: u64,
    /// Re-probe service health at this interval; probe once when unset
    pub health_refresh_secs: Option<u64>,
    pub recent_addresses: Vec<String>,
    /// Where `save` writes to; in-memory configs are never persisted
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: None,
            origin: DEFAULT_ORIGIN.to_string(),
            default_address: DEFAULT_ADDRESS.to_string(),
            tx_limit: DEFAULT_TX_LIMIT,
            strictness: Strictness::Strict,
            request_timeout_secs: 15,
            health_refresh_secs: None,
            recent_addresses: Vec::new(),
            path: None,
        }
    }
}

impl Config {
    /// Returns the config directory path (~/.config/chainboard on Linux)
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("chainboard"))
            .context("Could not determine config directory")
    }

    /// Returns the config file path
    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from disk, or return defaults if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {path:?}"))?;
            Self::from_toml(&contents)?
        } else {
            Self::default()
        };

        config.path = Some(path);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config file")
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {dir:?}"))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {path:?}"))?;

        Ok(())
    }

    /// Backend root from the environment, falling back to the config file
    pub fn backend_url(&self) -> Option<String> {
        std::env::var(BACKEND_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.backend_url.clone())
    }

    /// API base: `{backend}/api` when a backend is configured, else the
    /// same-origin relative `/api`
    pub fn api_base(&self) -> String {
        Self::api_base_for(self.backend_url().as_deref())
    }

    pub fn api_base_for(backend_url: Option<&str>) -> String {
        match backend_url {
            Some(url) => format!("{}/api", url.trim().trim_end_matches('/')),
            None => "/api".to_string(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn health_refresh(&self) -> Option<Duration> {
        self.health_refresh_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Add an address to recent history (keeps last 10) and persist
    pub fn add_recent_address(&mut self, address: &str) -> Result<()> {
        // Remove if already exists to avoid duplicates
        self.recent_addresses
            .retain(|s| !s.eq_ignore_ascii_case(address));
        self.recent_addresses.insert(0, address.to_string());
        self.recent_addresses.truncate(MAX_RECENT);
        self.save()
    }

    pub fn remove_recent_address(&mut self, index: usize) -> Result<()> {
        if index < self.recent_addresses.len() {
            self.recent_addresses.remove(index);
        }
        self.save()
    }
}
