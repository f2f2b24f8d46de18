//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::{Config, TokenSource};

/// Quote a string as a TOML basic string
fn quoted(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

impl Config {
    /// Serialize config to TOML string (single source of truth for format)
    ///
    /// The token is only written back when it came from the file. A token
    /// from GITHUB_TOKEN never lands on disk.
    pub fn to_toml(&self) -> String {
        format!(
            r#"# repo-scout configuration

# GitHub REST API root (REPO_SCOUT_API_URL overrides)
# GitHub Enterprise: "https://github.example.com/api/v3"
api_url = {api_url}

# Personal access token for higher rate limits (GITHUB_TOKEN overrides)
# Leave unset for anonymous access (60 requests/hour)
{auth_token}
# Minimum spacing between outbound queries, in milliseconds
throttle_ms = {throttle_ms}

# Per-request timeout, in seconds
request_timeout_secs = {timeout}

# Search text the repository view starts with
initial_query = {initial_query}

# Theme: dark, light, nord (REPO_SCOUT_THEME overrides, Ctrl+T cycles)
theme = {theme}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# File logging (in addition to TUI log strip or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            api_url = quoted(&self.api_url),
            auth_token = match (&self.auth_token, self.token_source) {
                (Some(token), TokenSource::File) => format!("auth_token = {}\n", quoted(token)),
                _ => "# auth_token = \"ghp_...\"\n".to_string(),
            },
            throttle_ms = self.throttle_ms,
            timeout = self.request_timeout_secs,
            initial_query = quoted(&self.initial_query),
            theme = quoted(&self.theme),
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }
}
