//! Shared proptest configuration.
//!
//! Env knobs:
//! - `PROPTEST_CASES`: number of cases per property (default 64).
//! - `PROPTEST_MAX_SHRINK_MS`: optional cap for shrinking time in milliseconds.

use proptest::prelude::ProptestConfig;

pub fn config() -> ProptestConfig {
    let base = ProptestConfig::default();

    let cases: u32 = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(64)
        .max(1);

    let max_shrink_time: u32 = std::env::var("PROPTEST_MAX_SHRINK_MS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(base.max_shrink_time);

    ProptestConfig {
        failure_persistence: None,
        cases,
        max_shrink_time,
        ..base
    }
}
