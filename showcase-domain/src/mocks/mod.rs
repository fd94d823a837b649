//! Mock collaborators and mocked use-cases.
//!
//! Compiled for tests and behind the `mocks` feature so UI crates can drive
//! their own tests without real data sources.

mod fixtures;
mod repositories;
mod services;
mod use_cases;

pub use fixtures::*;
pub use repositories::*;
pub use services::*;
pub use use_cases::*;
