use serde::{Deserialize, Serialize};

use super::defaults;

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Level for the `ron` targets when no filter is set. Default: "info".
    pub log_level: String,
    /// Environment variable holding an `EnvFilter` directive. Default: "RON_LOG".
    pub log_env: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            log_env: defaults::DEFAULT_LOG_ENV.to_string(),
        }
    }
}
