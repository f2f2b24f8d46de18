//! Application configuration
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/repo-scout/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::github::client::DEFAULT_API_URL;
use crate::github::Credential;
use crate::query::DEFAULT_THROTTLE;

mod logging;
mod serialization;

#[cfg(test)]
mod tests;

pub use logging::{LogRotation, LoggingConfig};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_THROTTLE_MS: u64 = DEFAULT_THROTTLE.as_millis() as u64;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_INITIAL_QUERY: &str = "react";
const DEFAULT_THEME: &str = "dark";

/// Where the auth token came from (shown by `config --show` and the banner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenSource {
    Env,
    File,
    #[default]
    None,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// GitHub REST API root (GitHub Enterprise: https://host/api/v3)
    pub api_url: String,

    /// Bearer token; `None` means anonymous access
    pub auth_token: Option<String>,

    pub token_source: TokenSource,

    /// Throttle window for outbound queries, in milliseconds
    pub throttle_ms: u64,

    /// Per-request timeout
    pub request_timeout_secs: u64,

    /// Search text the repository view starts with
    pub initial_query: String,

    /// Theme name: dark, light, nord
    pub theme: String,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_token: None,
            token_source: TokenSource::None,
            throttle_ms: DEFAULT_THROTTLE_MS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            initial_query: DEFAULT_INITIAL_QUERY.to_string(),
            theme: DEFAULT_THEME.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure; every key is optional
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub auth_token: Option<String>,
    pub throttle_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub initial_query: Option<String>,
    pub theme: Option<String>,

    /// Optional [logging] section
    pub logging: Option<LoggingConfig>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/repo-scout/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("repo-scout").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load configuration: env > file > defaults
    ///
    /// A config file that exists but doesn't parse is an error rather than a
    /// silent fallback to defaults.
    pub fn load() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::read_file_config(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(file, |key| std::env::var(key).ok()))
    }

    fn read_file_config(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read config file {}", path.display())),
        }
    }

    /// Merge a parsed file with environment lookups
    pub(crate) fn merge(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |v: String| (!v.trim().is_empty()).then_some(v);

        let api_url = env("REPO_SCOUT_API_URL")
            .and_then(non_blank)
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        // Token: GITHUB_TOKEN > file > anonymous
        let (auth_token, token_source) = match env("GITHUB_TOKEN").and_then(non_blank) {
            Some(token) => (Some(token), TokenSource::Env),
            None => match file.auth_token.and_then(non_blank) {
                Some(token) => (Some(token), TokenSource::File),
                None => (None, TokenSource::None),
            },
        };

        let throttle_ms = env("REPO_SCOUT_THROTTLE_MS")
            .and_then(|v| v.parse().ok())
            .or(file.throttle_ms)
            .unwrap_or(defaults.throttle_ms);

        let request_timeout_secs = file
            .request_timeout_secs
            .filter(|&s| s > 0)
            .unwrap_or(defaults.request_timeout_secs);

        let initial_query = file.initial_query.unwrap_or(defaults.initial_query);

        let theme = env("REPO_SCOUT_THEME")
            .and_then(non_blank)
            .or(file.theme)
            .unwrap_or(defaults.theme);

        Self {
            api_url,
            auth_token,
            token_source,
            throttle_ms,
            request_timeout_secs,
            initial_query,
            theme,
            logging: file.logging.unwrap_or_default(),
        }
    }

    /// Credential handed to both coordinators
    pub fn credential(&self) -> Credential {
        Credential::from_option(self.auth_token.clone())
    }

    pub fn throttle_window(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
