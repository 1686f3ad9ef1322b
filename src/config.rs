// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! All fields have defaults, so a config file only needs to list what it
//! changes. See `io::serialization` for reading and writing it.

use crate::models::{board::BoardSettings, tool::FieldKind};
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming a config file to load.
pub const CONFIG_ENV: &str = "TAKTIKTAFEL_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "taktiktafel.yaml";

/// Canvas size and optional background image of one field kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub width: u32,
    pub height: u32,
    /// Background image; the canvas takes its size when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

/// Board settings loaded at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub playback_interval_ms: u64,
    pub history_limit: usize,
    pub default_stroke_width: f32,
    pub default_color: String,
    pub palette: Vec<String>,
    pub full_field: FieldConfig,
    pub half_field: FieldConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            playback_interval_ms: 800,
            history_limit: 50,
            default_stroke_width: 3.0,
            default_color: "#e53935".to_string(),
            palette: ["#e53935", "#1e88e5", "#fdd835", "#43a047", "#000000", "#ffffff"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            full_field: FieldConfig {
                width: 1050,
                height: 680,
                image: None,
            },
            half_field: FieldConfig {
                width: 680,
                height: 525,
                image: None,
            },
        }
    }
}

impl BoardConfig {
    /// Load the config named by `TAKTIKTAFEL_CONFIG`, else `taktiktafel.yaml`
    /// if present, else defaults.
    pub fn discover() -> anyhow::Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    log::info!("No config file found, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };
        Self::load(&path)
    }

    /// Load from a YAML or JSON file, chosen by extension.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config = crate::io::serialization::import_config(path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn field(&self, kind: FieldKind) -> &FieldConfig {
        match kind {
            FieldKind::Full => &self.full_field,
            FieldKind::Half => &self.half_field,
        }
    }

    /// Palette entries that parse as colors.
    pub fn palette_colors(&self) -> Vec<Rgb<u8>> {
        self.palette.iter().filter_map(|c| parse_hex_color(c)).collect()
    }

    pub fn board_settings(&self) -> BoardSettings {
        let defaults = BoardSettings::default();
        let stroke_color = parse_hex_color(&self.default_color).unwrap_or_else(|| {
            log::warn!("Invalid default color {:?}, using {:?}", self.default_color, defaults.stroke_color);
            defaults.stroke_color
        });
        BoardSettings {
            history_limit: self.history_limit,
            playback_interval: Duration::from_millis(self.playback_interval_ms),
            stroke_width: self.default_stroke_width,
            stroke_color,
        }
    }
}

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(text: &str) -> Option<Rgb<u8>> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

/// Format a color as `#rrggbb`.
pub fn to_hex_color(color: Rgb<u8>) -> String {
    let [r, g, b] = color.0;
    format!("#{r:02x}{g:02x}{b:02x}")
}
