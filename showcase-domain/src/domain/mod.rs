mod action;
mod error;
pub mod models;
pub mod ports;
pub mod services;

pub use action::*;
pub use error::*;
