#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;
pub mod telemetry;
pub mod utils;


// Re-exports for public API
pub use catalog::{CardCatalog, CatalogEntry, CatalogError, InMemoryCatalog};
pub use config::EngineConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use services::{
    NewSession, PlaceCardResult, SessionMutationResult, SessionService, WinnerSelection,
};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
