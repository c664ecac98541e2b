//! Configuration errors.

use super::error_code::{self, RonErrorCode};

/// Failures while loading, overriding or validating a [`RonConfig`].
///
/// [`RonConfig`]: crate::config::RonConfig
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },

    #[error("bad TOML in {path}: {message}")]
    Toml { path: String, message: String },

    #[error("cannot write config as TOML: {message}")]
    Serialize { message: String },

    #[error("{field} is out of range: {message}")]
    OutOfRange { field: String, message: String },

    #[error("{var} override rejected: {message}")]
    EnvOverride { var: String, message: String },
}

impl ConfigError {
    /// True when the config file is simply absent.
    pub fn is_missing_file(&self) -> bool {
        match self {
            Self::Unreadable { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

impl RonErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
