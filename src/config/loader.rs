//! Settings resolution: defaults, TOML file, environment, command line.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// API root used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/v1";

/// Debounce window used when nothing else is configured.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "POSTBOARD_CONFIG";

/// Environment variable overriding the API root.
pub const API_URL_ENV_VAR: &str = "POSTBOARD_API_URL";

/// A config file that exists but cannot be used.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Cannot read config file {path}: {reason}")]
    ReadError {
        /// File that was attempted.
        path: PathBuf,
        /// I/O error description.
        reason: String,
    },

    /// The file is not valid TOML or names an unknown setting.
    #[error("Cannot parse config file {path}: {reason}")]
    ParseError {
        /// File that was parsed.
        path: PathBuf,
        /// Decoder error description.
        reason: String,
    },
}

/// Settings as written in `~/.config/postboard/config.toml`.
///
/// Every key is optional:
///
/// ```toml
/// api_url = "https://blog.example.com/api/v1"
/// debounce_ms = 300
/// request_timeout_secs = 10
/// log_file_path = "/tmp/postboard.log"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Root of the blog API.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Search debounce window in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Per-request timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Where tracing output is written.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Effective settings once every source has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Root of the blog API.
    pub api_url: String,
    /// Search debounce window.
    pub debounce: Duration,
    /// Per-request timeout; `None` leaves requests bounded by the transport.
    pub request_timeout: Option<Duration>,
    /// Where tracing output is written.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            request_timeout: None,
            log_file_path: default_log_path(),
        }
    }
}

/// Log location when none is configured.
///
/// `~/.local/state/postboard/postboard.log` on Linux, the platform state
/// directory elsewhere, the working directory when there is none.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("postboard").join("postboard.log"),
        None => PathBuf::from("postboard.log"),
    }
}

/// Read and decode the file at `path`. A missing file is `Ok(None)`.
///
/// # Errors
///
/// [`ConfigError`] when the file exists but cannot be read or decoded.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Config location when none is given: `~/.config/postboard/config.toml` on Unix, the platform config
/// directory elsewhere, or `None` when it cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("postboard").join("config.toml"))
}

/// Find and read the config file.
///
/// The first source that names a path wins:
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `POSTBOARD_CONFIG` environment variable
/// 3. Default path `~/.config/postboard/config.toml`
///
/// # Errors
///
/// [`ConfigError`] when the chosen file exists but cannot be used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    let chosen = config_path
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .or_else(default_config_path);

    match chosen {
        Some(path) => load_config_file(path),
        None => Ok(None),
    }
}

/// Layer file settings over the defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();
    let config = config_file.unwrap_or_default();

    ResolvedConfig {
        api_url: config.api_url.unwrap_or(defaults.api_url),
        debounce: config
            .debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.debounce),
        request_timeout: config
            .request_timeout_secs
            .map(Duration::from_secs)
            .or(defaults.request_timeout),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Layer `POSTBOARD_API_URL` over `config`. A blank value is ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(api_url) = std::env::var(API_URL_ENV_VAR) {
        if !api_url.trim().is_empty() {
            config.api_url = api_url;
        }
    }
    config
}

/// Layer command-line flags over `config`. They win over every other source.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    api_url_override: Option<String>,
    debounce_ms_override: Option<u64>,
) -> ResolvedConfig {
    if let Some(api_url) = api_url_override {
        config.api_url = api_url;
    }
    if let Some(ms) = debounce_ms_override {
        config.debounce = Duration::from_millis(ms);
    }
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
