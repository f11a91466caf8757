//! Configuration Management
//!
//! Handles persistent configuration storage for dnd5e.

use crate::api::{ApiClient, DEFAULT_LINK_CONCURRENCY, DEFAULT_ROOT};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// API root URL
    #[serde(default)]
    pub root_url: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Request headers, set on top of the default `Accept` header
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// How many links are fetched at once
    #[serde(default)]
    pub link_concurrency: Option<usize>,
    /// Last path viewed in `browse`
    #[serde(default)]
    pub last_path: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dnd5e").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from a specific file; missing or unreadable files give defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective root (CLI > config > default)
    pub fn effective_root(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.root_url.clone())
            .unwrap_or_else(|| DEFAULT_ROOT.to_string())
    }

    /// Get effective timeout (CLI > config > none)
    pub fn effective_timeout(&self, cli: Option<u64>) -> Option<Duration> {
        cli.or(self.timeout_secs).map(Duration::from_secs)
    }

    /// Get effective headers; CLI headers are layered over the config ones
    pub fn effective_headers(&self, cli: &[(String, String)]) -> BTreeMap<String, String> {
        let mut headers = self.headers.clone();
        headers.extend(cli.iter().cloned());
        headers
    }

    /// Build the API client these settings describe
    pub fn client(
        &self,
        root: Option<&str>,
        timeout_secs: Option<u64>,
        headers: &[(String, String)],
    ) -> Result<ApiClient> {
        ApiClient::new(&self.effective_root(root))?
            .with_timeout(self.effective_timeout(timeout_secs))
            .with_link_concurrency(self.link_concurrency.unwrap_or(DEFAULT_LINK_CONCURRENCY))
            .add_headers(self.effective_headers(headers))
    }

    /// Remember the last browsed path and save
    pub fn set_last_path(&mut self, path: &str) -> Result<()> {
        self.last_path = Some(path.to_string());
        self.save()
    }
}
