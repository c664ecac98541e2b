//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Initialize logging with the default configuration.
///
/// Reads the `RON_LOG` environment variable for per-crate log levels.
/// Format: `RON_LOG=ron_frame=debug,ron_reduce=info`
///
/// Falls back to `ron=info` if `RON_LOG` is not set or is invalid.
pub fn init_tracing() {
    init_tracing_with(&ObservabilityConfig::default());
}

/// Initialize logging from an [`ObservabilityConfig`].
///
/// Idempotent: only the first call installs a subscriber. A subscriber
/// installed elsewhere by the host application is left in place.
pub fn init_tracing_with(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(&config.log_env)
            .unwrap_or_else(|_| EnvFilter::new(format!("ron={}", config.log_level)));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
