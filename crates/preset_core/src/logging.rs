//! Tracing setup for tests that drive presets.

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "preset_core=info,preset_mssql=info";

/// Install a fmt subscriber that writes through the test harness.
///
/// Honors `RUST_LOG`. Safe to call from every test; only the first call
/// installs a subscriber.
pub fn init_test_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
