//! Reduction errors.
//!
//! Each variant maps to a name UUID so the failure can be written back into
//! a frame as an ordinary, orderable op.

use super::error_code::{self, RonErrorCode};
use crate::uuid::Uuid;

/// Code: the inputs cannot be combined without the full state.
pub const NOT_INCREMENTAL: Uuid = Uuid::name_str("NOTINCREM");
/// Code: the inputs carry different data types.
pub const BAD_TYPE: Uuid = Uuid::name_str("BADTYPE");
/// Code: the inputs address different objects.
pub const BAD_OBJECT: Uuid = Uuid::name_str("BADOBJECT");
/// Code: no reducer is registered for the type.
pub const NO_REDUCER: Uuid = Uuid::name_str("NOREDUCER");
/// Code: an input was rejected (e.g. it carries error ops).
pub const BAD_INPUT: Uuid = Uuid::name_str("BADINPUT");
/// Code: a reducer was registered twice.
pub const DUP_REDUCER: Uuid = Uuid::name_str("DUPREDUCER");

/// Errors surfaced by `Reduce`/`ReduceAll` and the reducer registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReduceError {
    /// Incremental reduction is impossible; retry with the batch path.
    #[error("{rdt} frames cannot be reduced incrementally: {reason}")]
    NotIncremental { rdt: Uuid, reason: String },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Uuid, found: Uuid },

    #[error("object mismatch: expected {expected}, found {found}")]
    ObjectMismatch { expected: Uuid, found: Uuid },

    #[error("no reducer registered for {rdt}")]
    NoReducer { rdt: Uuid },

    #[error("reducer already registered for {rdt}")]
    AlreadyRegistered { rdt: Uuid },

    #[error("input rejected: {reason}")]
    BadInput { reason: String },
}

impl ReduceError {
    /// The UUID-shaped error code of this failure.
    pub fn code(&self) -> Uuid {
        match self {
            Self::NotIncremental { .. } => NOT_INCREMENTAL,
            Self::TypeMismatch { .. } => BAD_TYPE,
            Self::ObjectMismatch { .. } => BAD_OBJECT,
            Self::NoReducer { .. } => NO_REDUCER,
            Self::AlreadyRegistered { .. } => DUP_REDUCER,
            Self::BadInput { .. } => BAD_INPUT,
        }
    }

    /// True when the caller should fall back to full-state reduction.
    pub fn is_not_incremental(&self) -> bool {
        matches!(self, Self::NotIncremental { .. })
    }
}

impl RonErrorCode for ReduceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotIncremental { .. } => error_code::REDUCE_NOT_INCREMENTAL,
            Self::TypeMismatch { .. } | Self::ObjectMismatch { .. } => {
                error_code::REDUCE_MISMATCH
            }
            Self::NoReducer { .. } => error_code::NO_REDUCER,
            Self::AlreadyRegistered { .. } => error_code::DUPLICATE_REDUCER,
            Self::BadInput { .. } => error_code::REDUCE_BAD_INPUT,
        }
    }
}
