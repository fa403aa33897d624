//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$HTML2EML_CONFIG` (environment variable)
//! 2. `~/.config/html2eml/config.toml` (Linux/macOS)
//!    `%APPDATA%\html2eml\config.toml` (Windows)
//! 3. Built-in defaults
//!
//! Command-line flags take precedence over anything set here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cid::DEFAULT_DOMAIN;
use crate::error::ConfigError;
use crate::mime::DEFAULT_SUBJECT;

/// Default name of the HTML document inside the input folder.
pub const DEFAULT_INDEX_FILE: &str = "index.html";

/// Name of the log file inside the cache directory.
pub const LOG_FILE_NAME: &str = "html2eml.log";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Headers and identifiers of the generated message.
    pub message: MessageConfig,
    /// Input folder layout.
    pub input: InputConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// Override the directory holding the log file.
    pub cache_dir: Option<PathBuf>,
    /// Preferred language code ("en", "es"). Defaults to the system locale.
    pub lang: Option<String>,
}

/// Headers and identifiers of the generated message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// `Subject` header value.
    pub subject: String,
    /// Emit `X-Unsent: 1` (open as draft in Outlook).
    pub unsent: bool,
    /// Domain part of generated Content-IDs.
    pub cid_domain: String,
}

/// Input folder layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// File name of the HTML document inside the input folder.
    pub index_file: String,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            cache_dir: None,
            lang: None,
        }
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            unsent: true,
            cid_domain: DEFAULT_DOMAIN.to_string(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            index_file: DEFAULT_INDEX_FILE.to_string(),
        }
    }
}

// ── Load ────────────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found. A file that exists
/// but cannot be read or parsed is an error; callers decide whether to fall
/// back to [`Config::default`].
pub fn load_config() -> Result<Config, ConfigError> {
    match config_file_path() {
        Some(path) => load_config_from(&path),
        None => Ok(Config::default()),
    }
}

/// Load configuration from `path`, or defaults when the file does not exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(env_path) = std::env::var_os("HTML2EML_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    dirs::config_dir().map(|d| d.join("html2eml").join("config.toml"))
}

/// Return the cache directory used for the log file.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("html2eml")
}

/// Return the log file path.
pub fn log_file_path(config: &Config) -> PathBuf {
    cache_dir(config).join(LOG_FILE_NAME)
}
