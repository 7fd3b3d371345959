//! Server configuration.
//!
//! Loaded from YAML; every field has a default so an empty document (or no
//! file at all) yields a working local setup.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::logging::LoggingConfig;

/// Names a YAML file to load in [`Config::load`].
pub const CONFIG_ENV: &str = "WARDEN_CONFIG";
/// Overrides `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub static_files: Vec<StaticFilesConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}

/// One `static_files` entry: a URL prefix served from a directory.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StaticFilesConfig {
    pub prefix: String,
    pub root: PathBuf,
}

impl Config {
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&source)
    }

    /// Reads the file named by `WARDEN_CONFIG` (defaults when unset), then
    /// applies the `LISTEN` override.
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => Self::default(),
        };
        cfg.apply_env();
        Ok(cfg)
    }

    pub fn apply_env(&mut self) {
        if let Ok(listen_addr) = std::env::var(LISTEN_ENV) {
            self.server.listen_addr = listen_addr;
        }
    }
}
