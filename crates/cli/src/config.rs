// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration management.
//!
//! Configuration is stored in `config.toml` inside the state directory and
//! includes:
//! - `remote`: where the create-resource endpoint lives
//! - `store`: name and structural version of the local offline store
//! - `monitor`: how often connectivity is probed
//!
//! The file is optional; every field has a default.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};

const STATE_DIR_NAME: &str = "pizza-hunt";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Client configuration stored in `<state_dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
}

/// Location of the pizza API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the server (default: `http://localhost:3001`).
    #[serde(default = "default_remote_url")]
    pub url: String,
    /// Path of the create-resource endpoint (default: `/api/pizzas`).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

/// Local offline store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database name; the file is `<state_dir>/<name>.db` (default: `pizza_hunt`).
    #[serde(default = "default_store_name")]
    pub name: String,
    /// Structural version (default: 1).
    #[serde(default = "default_store_version")]
    pub version: u32,
}

/// Connectivity monitor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Delay between connectivity probes in milliseconds (default: 2000).
    #[serde(default = "default_probe_interval_ms")]
    pub probe_interval_ms: u64,
    /// Max time a single probe may take in milliseconds (default: 1000).
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

fn default_remote_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_endpoint() -> String {
    "/api/pizzas".to_string()
}

fn default_store_name() -> String {
    "pizza_hunt".to_string()
}

fn default_store_version() -> u32 {
    1
}

fn default_probe_interval_ms() -> u64 {
    2_000
}

fn default_probe_timeout_ms() -> u64 {
    1_000
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            url: default_remote_url(),
            endpoint: default_endpoint(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: default_store_name(),
            version: default_store_version(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            probe_interval_ms: default_probe_interval_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl RemoteConfig {
    /// Validates that the URL is an absolute http(s) URL with a host.
    ///
    /// Returns an error message if the URL is invalid.
    pub fn validate_url(&self) -> Option<String> {
        match Url::parse(&self.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
                None
            }
            Ok(_) => Some(format!(
                "invalid remote URL '{}': must be http:// or https://",
                self.url
            )),
            Err(e) => Some(format!("invalid remote URL '{}': {}", self.url, e)),
        }
    }

    /// Full URL of the create-resource endpoint.
    pub fn resource_url(&self) -> String {
        let base = self.url.trim_end_matches('/');
        if self.endpoint.starts_with('/') {
            format!("{}{}", base, self.endpoint)
        } else {
            format!("{}/{}", base, self.endpoint)
        }
    }

    /// `host:port` the connectivity probe dials.
    ///
    /// Falls back to the scheme's default port when the URL has none.
    pub fn probe_addr(&self) -> Option<String> {
        let url = Url::parse(&self.url).ok()?;
        let host = url.host_str()?;
        let port = url.port_or_known_default()?;
        Some(format!("{}:{}", host, port))
    }
}

impl MonitorConfig {
    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms.max(1))
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms.max(1))
    }
}

impl Config {
    /// Loads configuration from the given state directory.
    ///
    /// A missing file yields the defaults.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let config_path = state_dir.join(CONFIG_FILE_NAME);
        let content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(Error::Config(format!("failed to read config: {}", e))),
        };
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Loads configuration and applies environment overrides.
    pub fn load_effective(state_dir: &Path) -> Result<Self> {
        let mut config = Config::load(state_dir)?;
        config.apply_remote_override(env::remote_url());
        config.validate()?;
        Ok(config)
    }

    /// Replace the remote URL when an override is present.
    pub fn apply_remote_override(&mut self, url: Option<String>) {
        if let Some(url) = url {
            self.remote.url = url;
        }
    }

    /// Checks values that cannot be expressed through serde defaults.
    pub fn validate(&self) -> Result<()> {
        if self.remote.validate_url().is_some() {
            return Err(Error::InvalidRemoteUrl(self.remote.url.clone()));
        }
        if self.store.name.trim().is_empty() {
            return Err(Error::Config("store name cannot be empty".to_string()));
        }
        if self.store.version == 0 {
            return Err(Error::Config("store version must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Saves configuration to the given state directory.
    pub fn save(&self, state_dir: &Path) -> Result<()> {
        if !state_dir.exists() {
            fs::create_dir_all(state_dir)?;
        }
        let config_path = state_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Resolve the state directory: `$PIZZA_HUNT_DIR`, else the platform data dir.
pub fn get_state_dir() -> Result<PathBuf> {
    if let Some(dir) = env::state_dir() {
        return Ok(dir);
    }
    dirs::data_local_dir()
        .map(|d| d.join(STATE_DIR_NAME))
        .ok_or(Error::NoStateDir)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
