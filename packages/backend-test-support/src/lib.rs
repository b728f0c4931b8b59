//! Backend test support utilities
//!
//! Shared by the engine's integration tests: unified logging initialization,
//! the proptest configuration, and unique test data.

pub mod logging;
pub mod proptest_config;
pub mod unique_helpers;
