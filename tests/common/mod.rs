//! Common test utilities

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `content` to `name` inside `dir`
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// A `capsule` command running in `dir`, isolated from user settings and log env
pub fn capsule_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("capsule").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env_remove("CAPSULE_LOG");
    cmd
}

/// Minimal valid capsule document
pub const MINIMAL_CAPSULE_JSON: &str = r#"{
  "capsule_id": "from-file-v1",
  "name": "From File",
  "version": "1.0.0",
  "domain_type": "reference"
}"#;
