//! Frame check errors.

use super::error_code::{self, RonErrorCode};
use crate::uuid::Uuid;

/// Errors reported by frame checkers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The frame does not parse past `offset`.
    #[error("unparsable op at offset {offset}")]
    Unparsable { offset: usize },

    /// The frame carries an error op.
    #[error("error op at offset {offset}")]
    ErrorOp { offset: usize },

    /// An op addresses a different object than the frame header.
    #[error("op at offset {offset} targets {found}, frame object is {expected}")]
    MixedObjects {
        offset: usize,
        expected: Uuid,
        found: Uuid,
    },

    /// An event is further in the future than the checker allows.
    #[error("event {event} is beyond the clock horizon {horizon}")]
    ClockAhead { event: Uuid, horizon: Uuid },
}

impl RonErrorCode for FrameError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ClockAhead { .. } => error_code::CLOCK_ERROR,
            _ => error_code::FRAME_ERROR,
        }
    }
}
