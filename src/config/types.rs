//! Settings types
//!
//! This module defines the data structures that represent a capsule.yml settings file.

use crate::model::UnknownKeys;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level settings structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// What to do with unrecognised keys in capsule files
    #[serde(default)]
    pub unknown_keys: UnknownKeys,

    /// Output format for printed capsules
    #[serde(default)]
    pub format: OutputFormat,
}

/// How a capsule is rendered on stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 2] = ["json", "yaml"];
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!(
                "Invalid output format: {}. Must be one of: json, yaml",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}
