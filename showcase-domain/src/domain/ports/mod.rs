//! Contracts between the use-cases and the outside world.
//!
//! * `inbound` - what callers (the UI layer) invoke.
//! * `outbound` - the data-layer collaborators the use-cases depend on.
pub mod inbound;
pub mod outbound;
