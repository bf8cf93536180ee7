use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ai::gemini::DEFAULT_MODEL;

pub const APP_NAME: &str = "meeting-insight";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Missing GEMINI_API_KEY environment variable and no key stored in the keyring")]
    MissingApiKey,
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join(APP_NAME)
}

fn default_listen() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_directory: PathBuf,
    pub listen: String,
    pub model: String,
    pub debug_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_dir(),
            listen: default_listen(),
            model: default_model(),
            debug_logging: false,
        }
    }
}

impl AppConfig {
    /// `<config dir>/meeting-insight/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join(APP_NAME)
            .join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path())
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// The credential from the environment, if set and non-blank.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

/// Environment first, then the system keyring.
pub async fn resolve_api_key() -> Result<String, ConfigError> {
    if let Some(key) = api_key_from_env() {
        return Ok(key);
    }
    match crate::ai::keyring::load_api_key().await {
        Ok(Some(key)) => Ok(key),
        Ok(None) => Err(ConfigError::MissingApiKey),
        Err(e) => {
            log::warn!("Keyring lookup failed: {}", e);
            Err(ConfigError::MissingApiKey)
        }
    }
}
