//! RonErrorCode trait for outer layers.

/// Every error enum provides a stable code string for consumers that do not
/// link against the Rust types (CLI front ends, wire error ops).
pub trait RonErrorCode {
    /// Returns the error code string (e.g., "CODEC_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CODEC_ERROR: &str = "CODEC_ERROR";
pub const FRAME_ERROR: &str = "FRAME_ERROR";
pub const CLOCK_ERROR: &str = "CLOCK_ERROR";
pub const REDUCE_NOT_INCREMENTAL: &str = "REDUCE_NOT_INCREMENTAL";
pub const REDUCE_MISMATCH: &str = "REDUCE_MISMATCH";
pub const REDUCE_BAD_INPUT: &str = "REDUCE_BAD_INPUT";
pub const NO_REDUCER: &str = "NO_REDUCER";
pub const DUPLICATE_REDUCER: &str = "DUPLICATE_REDUCER";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
