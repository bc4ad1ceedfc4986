//! Settings file discovery and parsing

use crate::config::types::Settings;
use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file names to search for
const SETTINGS_FILE_NAMES: &[&str] = &["capsule.yml", "capsule.yaml"];

/// Find a settings file in `start_dir` or any of its parents
pub fn find_settings_file_from(start_dir: PathBuf) -> Option<PathBuf> {
    let mut current_dir = start_dir;

    loop {
        for file_name in SETTINGS_FILE_NAMES {
            let path = current_dir.join(file_name);
            if path.is_file() {
                return Some(path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Settings file in the per-user configuration directory, if one exists
pub fn user_settings_file() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "capsule")?;
    SETTINGS_FILE_NAMES
        .iter()
        .map(|name| dirs.config_dir().join(name))
        .find(|path| path.is_file())
}

/// Parse settings from a YAML string; an empty document yields defaults
pub fn parse_settings(yaml: &str) -> ConfigResult<Settings> {
    if yaml.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(yaml).map_err(|e| ConfigError::Invalid(e.to_string()))
}

/// Read and parse a settings file
pub fn load_settings_file(path: &Path) -> ConfigResult<Settings> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_settings(&contents)
}

/// Load settings from an explicit path, or discover them.
///
/// Discovery checks the current directory and its parents, then the user
/// configuration directory. Finding nothing is not an error.
pub fn load_settings(explicit: Option<&Path>) -> ConfigResult<Settings> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), "loading settings");
        return load_settings_file(path);
    }

    let discovered = env::current_dir()
        .ok()
        .and_then(find_settings_file_from)
        .or_else(user_settings_file);

    match discovered {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading discovered settings");
            load_settings_file(&path)
        }
        None => {
            tracing::debug!("no settings file found, using defaults");
            Ok(Settings::default())
        }
    }
}
