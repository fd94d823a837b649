//! Reference implementations of the outbound ports.

pub mod content;
pub mod media;
