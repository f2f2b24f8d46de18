//! Configuration tests
//!
//! Round-trip guards for `to_toml` plus the env > file > default precedence.

use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn no_env() -> impl Fn(&str) -> Option<String> {
    |_| None
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let merged = Config::merge(parsed.unwrap(), no_env());
    assert_eq!(merged, config);
}

#[test]
fn test_config_roundtrip_custom_values() {
    let config = Config {
        api_url: "https://github.example.com/api/v3".to_string(),
        auth_token: Some("ghp_file".to_string()),
        token_source: TokenSource::File,
        throttle_ms: 250,
        request_timeout_secs: 5,
        initial_query: "tokio \"rt\"".to_string(),
        theme: "nord".to_string(),
        logging: LoggingConfig {
            level: "debug".to_string(),
            file_enabled: true,
            file_dir: std::path::PathBuf::from("/tmp/scout-logs"),
            file_rotation: LogRotation::Hourly,
            file_prefix: "scout".to_string(),
        },
    };

    let file: FileConfig = toml::from_str(&config.to_toml()).expect("custom config parses");
    assert_eq!(Config::merge(file, no_env()), config);
}

#[test]
fn test_env_token_is_never_written() {
    let config = Config::merge(
        FileConfig::default(),
        env_from(&[("GITHUB_TOKEN", "ghp_secret")]),
    );
    assert_eq!(config.token_source, TokenSource::Env);

    let toml_str = config.to_toml();
    assert!(!toml_str.contains("ghp_secret"));
    assert!(toml_str.contains("# auth_token"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_defaults_when_nothing_set() {
    let config = Config::merge(FileConfig::default(), no_env());
    assert_eq!(config.api_url, "https://api.github.com");
    assert_eq!(config.throttle_ms, 1000);
    assert_eq!(config.initial_query, "react");
    assert_eq!(config.theme, "dark");
    assert!(!config.credential().is_authenticated());
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
api_url = "https://file.example/api"
auth_token = "from-file"
theme = "light"
throttle_ms = 500
"#,
    )
    .unwrap();

    let config = Config::merge(
        file,
        env_from(&[
            ("REPO_SCOUT_API_URL", "https://env.example/api"),
            ("GITHUB_TOKEN", "from-env"),
            ("REPO_SCOUT_THEME", "nord"),
            ("REPO_SCOUT_THROTTLE_MS", "0"),
        ]),
    );

    assert_eq!(config.api_url, "https://env.example/api");
    assert_eq!(config.auth_token.as_deref(), Some("from-env"));
    assert_eq!(config.token_source, TokenSource::Env);
    assert_eq!(config.theme, "nord");
    assert_eq!(config.throttle_ms, 0);
}

#[test]
fn test_blank_values_fall_through() {
    let file: FileConfig = toml::from_str(r#"auth_token = "  ""#).unwrap();
    let config = Config::merge(file, env_from(&[("GITHUB_TOKEN", "")]));
    assert_eq!(config.auth_token, None);
    assert_eq!(config.token_source, TokenSource::None);
}

#[test]
fn test_file_token_used_without_env() {
    let file: FileConfig = toml::from_str(r#"auth_token = "ghp_file""#).unwrap();
    let config = Config::merge(file, no_env());
    assert_eq!(config.token_source, TokenSource::File);
    assert!(config.credential().is_authenticated());
}

#[test]
fn test_zero_timeout_uses_default() {
    let file: FileConfig = toml::from_str("request_timeout_secs = 0").unwrap();
    let config = Config::merge(file, no_env());
    assert_eq!(config.request_timeout(), std::time::Duration::from_secs(30));
}

#[test]
fn test_unparseable_throttle_env_ignored() {
    let config = Config::merge(
        FileConfig::default(),
        env_from(&[("REPO_SCOUT_THROTTLE_MS", "soon")]),
    );
    assert_eq!(config.throttle_window(), std::time::Duration::from_millis(1000));
}

#[test]
fn test_logging_section_partial() {
    let file: FileConfig = toml::from_str(
        r#"
[logging]
level = "trace"
"#,
    )
    .unwrap();
    let config = Config::merge(file, no_env());
    assert_eq!(config.logging.level, "trace");
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
    assert_eq!(config.logging.file_prefix, "repo-scout");
    assert!(!config.logging.file_enabled);
}

#[test]
fn test_logging_rotation_read_from_file() {
    let file: FileConfig = toml::from_str(
        r#"
[logging]
file_enabled = true
file_dir = "/var/log/scout"
file_rotation = "hourly"
"#,
    )
    .unwrap();
    let config = Config::merge(file, no_env());
    assert!(config.logging.file_enabled);
    assert_eq!(config.logging.file_dir, PathBuf::from("/var/log/scout"));
    assert_eq!(config.logging.file_rotation, LogRotation::Hourly);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_unknown_log_rotation_rejected() {
    let parsed = toml::from_str::<FileConfig>(
        r#"
[logging]
file_rotation = "weekly"
"#,
    );
    assert!(parsed.is_err());
}
