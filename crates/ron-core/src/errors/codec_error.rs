//! Errors from parsing standalone UUID literals.

use super::error_code::{self, RonErrorCode};

/// Errors from parsing a standalone UUID or integer literal.
///
/// In-stream decoding never produces these: a short read there simply
/// consumes zero bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("empty input")]
    Empty,

    #[error("invalid byte {byte:#04x} at offset {offset}")]
    InvalidByte { offset: usize, byte: u8 },

    #[error("trailing input at offset {offset}")]
    TrailingInput { offset: usize },
}

impl RonErrorCode for CodecError {
    fn error_code(&self) -> &'static str {
        error_code::CODEC_ERROR
    }
}
