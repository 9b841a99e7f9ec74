//! Configuration loading and data folder resolution

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Environment variable overriding the data folder
pub const ROOT_FOLDER_ENV: &str = "BACKSTAGE_ROOT_FOLDER";

/// Environment variable overriding the proxy origin used for sync
pub const PROXY_URL_ENV: &str = "BACKSTAGE_PROXY_URL";

/// Proxy origin used when nothing else is configured
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:5790";

/// Logging section of the TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `backstage_common=debug`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Contents of `config.toml`; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub proxy_url: Option<String>,
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse TOML text
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Read a config file
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Read `path`, or the platform default when `None`
    ///
    /// A missing file is normal and yields defaults; an unreadable or
    /// malformed one is an error the caller may choose to ignore.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::read(&path)
    }
}

/// `~/.config/backstage/config.toml` (platform equivalent elsewhere)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("backstage").join("config.toml"))
}

/// OS-dependent default data folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("backstage"))
        .unwrap_or_else(|| PathBuf::from("./backstage_data"))
}

/// Data folder resolution, highest priority first:
/// 1. Command-line argument
/// 2. `BACKSTAGE_ROOT_FOLDER`
/// 3. `root_folder` in the TOML config
/// 4. OS-dependent default
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml_config.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// Proxy origin resolution, same priority order as [`resolve_root_folder`]
pub fn resolve_proxy_url(cli_arg: Option<&str>, toml_config: &TomlConfig) -> String {
    if let Some(url) = cli_arg {
        return url.to_string();
    }

    if let Ok(url) = std::env::var(PROXY_URL_ENV) {
        if !url.trim().is_empty() {
            return url;
        }
    }

    toml_config
        .proxy_url
        .clone()
        .unwrap_or_else(|| DEFAULT_PROXY_URL.to_string())
}
