//! Rendering capsules for stdout

use crate::config::OutputFormat;
use crate::error::Result;
use crate::model::Capsule;

/// Render a capsule's mapping form in the requested format
pub fn render_capsule(capsule: &Capsule, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(capsule)?,
        OutputFormat::Yaml => serde_yaml::to_string(capsule)?.trim_end().to_string(),
    };
    Ok(rendered)
}
