//! Fixtures shared by the integration tests of every crate.

pub mod bridge;
pub mod fixtures;
pub mod router;
pub mod store;

/// Send logs to the test harness's captured output. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
