//! Tracing/logging initialization.
//!
//! Both entry points are safe to call multiple times (subsequent calls are
//! no-ops), so every test can call `init_for_tests()` unconditionally.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing/logging for the process.
///
/// JSON logs + timestamps, configurable via `RUST_LOG`.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Initialize compact, human-readable output captured by the test harness.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .compact()
        .with_test_writer()
        .try_init();
}
