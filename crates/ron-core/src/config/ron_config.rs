//! Top-level RON configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{FormatConfig, ObservabilityConfig, ReduceConfig};
use crate::errors::ConfigError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`RON_*`)
/// 2. Config file
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RonConfig {
    pub format: FormatConfig,
    pub reduce: ReduceConfig,
    pub observability: ObservabilityConfig,
}

impl RonConfig {
    /// Load a config file, apply `RON_*` environment overrides, validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: RonConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Toml {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.apply_overrides_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        info!(
            path = %path.display(),
            zip = config.format.zip,
            error_ops = ?config.reduce.error_ops,
            "config loaded"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: RonConfig = toml::from_str(toml_str).map_err(|e| ConfigError::Toml {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
        })
    }

    /// Apply overrides from a key lookup (the process environment in
    /// [`RonConfig::load`]).
    ///
    /// Recognized keys: `RON_ZIP`, `RON_NEWLINES`, `RON_PARALLEL_THRESHOLD`,
    /// `RON_LOG_LEVEL`.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("RON_ZIP") {
            self.format.zip = parse_flag("RON_ZIP", &raw)?;
            debug!(zip = self.format.zip, "RON_ZIP override");
        }
        if let Some(raw) = lookup("RON_NEWLINES") {
            self.format.newlines = parse_flag("RON_NEWLINES", &raw)?;
            debug!(newlines = self.format.newlines, "RON_NEWLINES override");
        }
        if let Some(raw) = lookup("RON_PARALLEL_THRESHOLD") {
            self.reduce.parallel_threshold =
                raw.trim().parse().map_err(|_| ConfigError::EnvOverride {
                    var: "RON_PARALLEL_THRESHOLD".to_string(),
                    message: format!("expected an integer, got {raw:?}"),
                })?;
            debug!(
                threshold = self.reduce.parallel_threshold,
                "RON_PARALLEL_THRESHOLD override"
            );
        }
        if let Some(raw) = lookup("RON_LOG_LEVEL") {
            self.observability.log_level = raw.trim().to_ascii_lowercase();
            debug!(level = %self.observability.log_level, "RON_LOG_LEVEL override");
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reduce.parallel_threshold == 0 {
            return Err(ConfigError::OutOfRange {
                field: "reduce.parallel_threshold".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if !LOG_LEVELS.contains(&self.observability.log_level.as_str()) {
            return Err(ConfigError::OutOfRange {
                field: "observability.log_level".to_string(),
                message: format!("must be one of {}", LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
    }
}

fn parse_flag(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::EnvOverride {
            var: var.to_string(),
            message: format!("expected a boolean, got {raw:?}"),
        }),
    }
}
