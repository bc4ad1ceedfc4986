//! Capsule - metadata records for Obsidian content packages
//!
//! This crate provides the `Capsule` record with its mapping conversions and
//! the `capsule` command-line front door.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use error::{CapsuleError, ErrorKind, Result};
pub use model::Capsule;

/// Current version of the Capsule CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
