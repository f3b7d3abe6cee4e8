//! Tracing initialisation for tests
//!
//! Library code never installs a global subscriber; tests that want log
//! output opt in once per process.

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static INIT: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
});

/// Installs the test subscriber once; safe to call from every test
pub fn init_tracing() {
    Lazy::force(&INIT);
}
