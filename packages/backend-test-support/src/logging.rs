//! Unified test logging initialization
//!
//! One subscriber per test process, shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Level filter for tests: `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn filter() -> EnvFilter {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initialize logging for tests.
///
/// Idempotent and race-safe. Output goes through the test writer so cargo
/// and nextest capture it per test, and timestamps are left out.
///
/// ```bash
/// TEST_LOG=timeline_backend=debug cargo test -p timeline-backend
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        fmt()
            .with_env_filter(filter())
            .with_test_writer()
            .without_time()
            .try_init()
            .ok(); // Another subscriber may already be installed
    });
}
