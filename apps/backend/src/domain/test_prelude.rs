// Shared configuration for domain property tests; the case count and shrink
// budget come from `backend_test_support::proptest_config`.

pub fn proptest_config() -> proptest::prelude::ProptestConfig {
    backend_test_support::proptest_config::config()
}
