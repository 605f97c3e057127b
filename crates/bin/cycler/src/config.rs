//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `cycler.toml` in the working directory unless a path is given
//! on the command line. Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use cycler_adapter_memory::GroupFixture;
use cycler_app::services::DEFAULT_GRACE_PERIOD;
use serde::Deserialize;

const DEFAULT_PATH: &str = "cycler.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Group controller settings.
    pub controller: ControllerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Groups known to the simulated control plane.
    pub inventory: InventoryConfig,
}

/// Group controller configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Seconds to wait between a group adjustment and the instance fan-out.
    pub grace_period_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Seed data for the simulated control plane.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub groups: Vec<GroupFixture>,
}

impl Config {
    /// Load configuration from `path` (or `cycler.toml` when `None`) then
    /// apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed, if an explicitly given
    /// file is missing, or if validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path, true)?,
            None => Self::from_file(Path::new(DEFAULT_PATH), false)?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CYCLER_GRACE_PERIOD_SECS")
            && let Ok(secs) = val.parse()
        {
            self.controller.grace_period_secs = secs;
        }
        if let Ok(val) = std::env::var("CYCLER_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for group in &self.inventory.groups {
            if !seen.insert(&group.name) {
                return Err(ConfigError::Validation(format!(
                    "group {} declared more than once in inventory",
                    group.name
                )));
            }
        }
        Ok(())
    }

    /// Grace period as a [`Duration`].
    #[must_use]
    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.controller.grace_period_secs)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: DEFAULT_GRACE_PERIOD.as_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "cycler=info,cycler_app=info,cycler_adapter_memory=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
