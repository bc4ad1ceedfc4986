//! Capsule data model
//!
//! This module defines the capsule metadata record and the clock
//! abstraction used to default its timestamps.

pub mod capsule;
pub mod clock;

// Re-export main types
pub use capsule::*;
pub use clock::*;
