use serde::{Deserialize, Serialize};

use super::defaults;

/// Output formatting options for frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Compress spec UUIDs against the previous op. When off, every op
    /// carries all four fields in flat form. Default: true.
    pub zip: bool,
    /// Write a newline after every op. Default: false.
    pub newlines: bool,
}

impl FormatConfig {
    /// Flat, one op per line; the form used for logs and debugging.
    pub const fn verbose() -> Self {
        Self {
            zip: false,
            newlines: true,
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            zip: defaults::DEFAULT_ZIP,
            newlines: defaults::DEFAULT_NEWLINES,
        }
    }
}
