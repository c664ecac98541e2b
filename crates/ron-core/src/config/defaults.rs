// Single source of truth for all default values.

// --- Format ---
pub const DEFAULT_ZIP: bool = true;
pub const DEFAULT_NEWLINES: bool = false;

// --- Reduce ---
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_ENV: &str = "RON_LOG";
