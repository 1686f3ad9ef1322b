// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Config serialization and deserialization.
//!
//! This module handles exporting and importing the board config in YAML
//! and JSON formats.

use crate::config::BoardConfig;
use anyhow::{bail, Result};
use std::path::Path;

/// Export config to YAML format.
pub fn export_yaml(config: &BoardConfig, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export config to JSON format.
pub fn export_json(config: &BoardConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import config from YAML format.
pub fn import_yaml(path: &Path) -> Result<BoardConfig> {
    let yaml = std::fs::read_to_string(path)?;
    let config = serde_yaml::from_str(&yaml)?;
    Ok(config)
}

/// Import config from JSON format.
pub fn import_json(path: &Path) -> Result<BoardConfig> {
    let json = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&json)?;
    Ok(config)
}

/// Import config, choosing the format from the file extension.
pub fn import_config(path: &Path) -> Result<BoardConfig> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        extension => bail!("Unsupported config extension: {:?}", extension),
    }
}

/// Export config, choosing the format from the file extension.
pub fn export_config(config: &BoardConfig, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => export_yaml(config, path),
        Some("json") => export_json(config, path),
        extension => bail!("Unsupported config extension: {:?}", extension),
    }
}
