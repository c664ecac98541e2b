//! Error handling for RON.
//! One error enum per subsystem, `thiserror` only.
//!
//! Parse failures inside a frame are not errors at this level: they travel
//! as error ops. These types cover the surfaces that do fail: literal
//! parsing, frame checks, reduction and configuration.

pub mod codec_error;
pub mod config_error;
pub mod error_code;
pub mod frame_error;
pub mod reduce_error;
pub mod ron_error;

pub use codec_error::CodecError;
pub use config_error::ConfigError;
pub use error_code::RonErrorCode;
pub use frame_error::FrameError;
pub use reduce_error::ReduceError;
pub use ron_error::{RonError, RonResult};
