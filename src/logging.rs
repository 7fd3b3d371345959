//! Logging setup.
//!
//! The subscriber is configured from an explicit [`LoggingConfig`]; nothing
//! in the crate reads a global debug switch.

use serde::Deserialize;
use tracing::Level;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
    /// Forces DEBUG output and per-step route-match tracing
    pub debug: bool,
    /// Include the event target (module path) in each line
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            debug: false,
            with_target: false,
        }
    }
}

impl LoggingConfig {
    /// Effective maximum level. Unknown level names fall back to INFO.
    pub fn max_level(&self) -> Level {
        if self.debug {
            return Level::DEBUG;
        }

        match self.level.to_ascii_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" | "warning" => Level::WARN,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        }
    }
}

/// Installs the global fmt subscriber.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(config.with_target)
        .with_level(true)
        .with_max_level(config.max_level())
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}
