//! Aggregate error type.

use super::error_code::RonErrorCode;
use super::{CodecError, ConfigError, FrameError, ReduceError};

/// Errors from any RON subsystem, via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum RonError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("Reduce error: {0}")]
    Reduce(#[from] ReduceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RonErrorCode for RonError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Codec(e) => e.error_code(),
            Self::Frame(e) => e.error_code(),
            Self::Reduce(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

pub type RonResult<T> = Result<T, RonError>;
