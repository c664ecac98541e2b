//! # ron-core
//!
//! Foundation crate for the RON (Replicated Object Notation) engine.
//! Defines the 128-bit UUID, the context-relative compression codec, wire
//! constants, errors, config and logging setup. The frame model and the
//! reducers build on it.

pub mod codec;
pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod uuid;

// Re-export the most commonly used types at the crate root.
pub use config::RonConfig;
pub use errors::{RonError, RonResult};
pub use uuid::{Uuid, UuidSign, ERROR_UUID, NEVER_UUID, ZERO_UUID};
