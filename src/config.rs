// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Settings come from an optional TOML file (`$DOODLESPEAK_CONFIG`, else
//! `doodlespeak.toml` in the working directory). The API key and model may
//! also come from `GEMINI_API_KEY` / `GEMINI_MODEL`; a value in the file
//! takes precedence over the environment.

use crate::error::AppError;
use crate::models::color::Rgb;
use crate::models::history::DEFAULT_HISTORY_LIMIT;
use crate::models::session::Brush;
use crate::services::{gemini, speech};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH_VAR: &str = "DOODLESPEAK_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "doodlespeak.toml";
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    gemini_api_key: Option<String>,
    gemini_model: Option<String>,
    service: ServiceSection,
    canvas: CanvasSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ServiceSection {
    gemini_endpoint: String,
    tts_endpoint: String,
    timeout_secs: u64,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            gemini_endpoint: gemini::DEFAULT_ENDPOINT.to_string(),
            tts_endpoint: speech::DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CanvasSection {
    size: u32,
    background: String,
    pen_color: String,
    pen_width: f32,
    history_limit: usize,
}

impl Default for CanvasSection {
    fn default() -> Self {
        Self {
            size: 600,
            background: "#FFFFFF".to_string(),
            pen_color: "#000000".to_string(),
            pen_width: 6.0,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Resolved settings.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub gemini_endpoint: String,
    pub tts_endpoint: String,
    pub timeout: Duration,
    pub canvas_size: u32,
    pub background: Rgb,
    pub brush: Brush,
    pub history_limit: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("gemini_endpoint", &self.gemini_endpoint)
            .field("tts_endpoint", &self.tts_endpoint)
            .field("timeout", &self.timeout)
            .field("canvas_size", &self.canvas_size)
            .field("background", &self.background)
            .field("brush", &self.brush)
            .field("history_limit", &self.history_limit)
            .finish()
    }
}

impl Config {
    /// Load from the config file (if any) and the process environment.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
        let file = match &explicit {
            Some(path) => read_file(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    read_file(path)?
                } else {
                    log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    FileConfig::default()
                }
            }
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Parse a TOML document and resolve it against `env`.
    pub fn from_toml(text: &str, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let file: FileConfig = toml::from_str(text).context("parse config toml")?;
        Self::resolve(file, env)
    }

    fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let api_key = non_blank(file.gemini_api_key)
            .or_else(|| non_blank(env(API_KEY_VAR)))
            .ok_or(AppError::ConfigMissing(API_KEY_VAR))?;
        let model = non_blank(file.gemini_model)
            .or_else(|| non_blank(env(MODEL_VAR)))
            .unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string());

        let canvas = file.canvas;
        if canvas.size == 0 {
            anyhow::bail!("canvas.size must be positive");
        }
        let background = Rgb::from_hex(&canvas.background)
            .with_context(|| format!("canvas.background {:?}", canvas.background))?;
        let pen_color = Rgb::from_hex(&canvas.pen_color)
            .with_context(|| format!("canvas.pen_color {:?}", canvas.pen_color))?;

        Ok(Self {
            api_key: api_key.trim().to_string(),
            model,
            gemini_endpoint: file.service.gemini_endpoint,
            tts_endpoint: file.service.tts_endpoint,
            timeout: Duration::from_secs(file.service.timeout_secs.max(1)),
            canvas_size: canvas.size,
            background,
            brush: Brush::new(pen_color, canvas.pen_width),
            history_limit: canvas.history_limit.max(1),
        })
    }
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    let file = toml::from_str(&text)
        .with_context(|| format!("parse config file: {}", path.display()))?;
    log::info!("Loaded configuration from {}", path.display());
    Ok(file)
}
