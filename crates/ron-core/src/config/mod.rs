//! Configuration for the RON engine.
//!
//! # Examples
//!
//! ```
//! use ron_core::config::{ErrorOpPolicy, RonConfig};
//!
//! let config = RonConfig::from_toml("[reduce]\nerror_ops = \"reject\"").unwrap();
//! assert_eq!(config.reduce.error_ops, ErrorOpPolicy::Reject);
//! assert!(config.format.zip);
//! ```

pub mod defaults;
pub mod format_config;
pub mod observability_config;
pub mod reduce_config;
pub mod ron_config;

pub use format_config::FormatConfig;
pub use observability_config::ObservabilityConfig;
pub use reduce_config::{ErrorOpPolicy, ReduceConfig};
pub use ron_config::RonConfig;
