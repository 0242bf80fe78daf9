//! Logging setup shared by the HerChronos binaries.
//!
//! Log lines go to stderr; stdout belongs to command output (snapshots,
//! CSV exports) so it can be piped safely.

use crate::config::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging from the `[logging]` config section.
///
/// `RUST_LOG` still wins over the configured level when it is set.
pub fn init(config: &LoggingConfig) {
    init_with_level(&config.level)
}

/// Initialize logging with a specific default level
pub fn init_with_level(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(default_level).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    // try_init so a second call (tests, embedders) is harmless
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
