//! Subcommand implementations
//!
//! Both commands are read-only: they build a capsule and hand it back for
//! printing.

use crate::error::{CapsuleError, Result};
use crate::model::{Capsule, Clock, UnknownKeys};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Arguments of `capsule new`
#[derive(Debug, Clone, Default)]
pub struct NewArgs {
    pub capsule_id: String,
    pub name: String,
    pub version: String,
    pub domain_type: String,
    pub description: Option<String>,
    pub author: Option<String>,
}

/// Construct a capsule from command-line fields
pub fn new_capsule(args: &NewArgs, clock: &dyn Clock) -> Result<Capsule> {
    let capsule = Capsule::builder()
        .capsule_id(args.capsule_id.as_str())
        .name(args.name.as_str())
        .version(args.version.as_str())
        .domain_type(args.domain_type.as_str())
        .description(args.description.clone())
        .author(args.author.clone())
        .build_with_clock(clock)?;

    tracing::info!(capsule_id = capsule.capsule_id(), "created capsule");
    Ok(capsule)
}

/// Read a capsule file into its raw mapping form.
///
/// `.yml`/`.yaml` files are parsed as YAML, everything else as JSON.
pub fn read_capsule_file(path: &Path) -> Result<Map<String, Value>> {
    let contents = fs::read_to_string(path).map_err(|source| CapsuleError::File {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yml") | Some("yaml")
    );

    let value: Value = if is_yaml {
        serde_yaml::from_str(&contents).map_err(|e| {
            CapsuleError::Validation(format!("{}: {}", path.display(), e))
        })?
    } else {
        serde_json::from_str(&contents).map_err(|e| {
            CapsuleError::Validation(format!("{}: {}", path.display(), e))
        })?
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(CapsuleError::Validation(format!(
            "{}: top level must be a mapping of capsule fields",
            path.display()
        ))),
    }
}

/// Load and check a capsule file, defaulting any missing timestamps
pub fn inspect_capsule(path: &Path, unknown_keys: UnknownKeys, clock: &dyn Clock) -> Result<Capsule> {
    tracing::debug!(path = %path.display(), ?unknown_keys, "inspecting capsule file");

    let data = read_capsule_file(path)?;
    let capsule = Capsule::from_dict_with(&data, unknown_keys, clock)?;

    Ok(capsule)
}
