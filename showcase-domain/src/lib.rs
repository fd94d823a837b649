pub mod adapters;
pub mod config;
pub mod domain;
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
pub mod telemetry;
