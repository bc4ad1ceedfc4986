//! CLI interface and argument parsing
//!
//! This module handles command-line parsing, the eager version banner and
//! the read-only subcommands.

pub mod app;
pub mod commands;
pub mod output;

// Re-export main types
pub use app::*;
