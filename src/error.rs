//! Error types for Capsule

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Capsule operations
pub type Result<T> = std::result::Result<T, CapsuleError>;

/// Kind of failure, one per process exit code family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Base,
    Validation,
    File,
    Network,
    UserCancelled,
    Config,
}

impl ErrorKind {
    /// Process exit code reported by the CLI for this kind
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Base => 1,
            ErrorKind::Validation => 1,
            ErrorKind::File => 2,
            ErrorKind::Network => 3,
            ErrorKind::UserCancelled => 4,
            ErrorKind::Config => 5,
        }
    }
}

/// Main error type for Capsule
#[derive(Error, Debug)]
pub enum CapsuleError {
    /// Capsule construction errors
    #[error("Invalid capsule: {0}")]
    Model(#[from] ModelError),

    /// Settings errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input that is structurally wrong before it reaches the model
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to read '{path}': {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CapsuleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CapsuleError::Model(_) | CapsuleError::Validation(_) => ErrorKind::Validation,
            CapsuleError::Config(_) => ErrorKind::Config,
            CapsuleError::File { .. } => ErrorKind::File,
            CapsuleError::Network(_) => ErrorKind::Network,
            CapsuleError::UserCancelled => ErrorKind::UserCancelled,
            CapsuleError::Json(_) | CapsuleError::Yaml(_) => ErrorKind::Base,
        }
    }

    /// Shorthand for `self.kind().exit_code()`
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

/// Errors raised while constructing a capsule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("unexpected field(s): {}", .0.join(", "))]
    UnknownFields(Vec<String>),

    #[error("field '{field}' must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
}

/// Settings discovery and parsing errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read settings file '{path}': {error}")]
    Read { path: PathBuf, error: String },

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Specialized result type for capsule construction
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Specialized result type for settings operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
