// SPDX-License-Identifier: MPL-2.0
//! Presenter configuration, persisted to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use status_alert::config::{self, Config};
//! use status_alert::PresentationMode;
//!
//! let mut config = config::load().unwrap_or_default();
//! config.mode = PresentationMode::ReplaceCurrent;
//! config.style.display_duration_ms = Some(3000);
//! config::save(&config).expect("Failed to save config");
//! ```
//!
//! A file only needs the keys it changes:
//!
//! ```toml
//! mode = "allow-multiple"
//!
//! [style]
//! corner_radius = 14.0
//! fade_duration_ms = 300
//! ```

pub mod defaults;

use crate::alert::style::{Style, StyleOverrides};
use crate::error::Result;
use crate::presentation::PresentationMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "StatusAlert";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mode: PresentationMode,
    #[serde(default, skip_serializing_if = "StyleOverrides::is_empty")]
    pub style: StyleOverrides,
}

impl Config {
    /// Default style with this configuration's overrides applied.
    #[must_use]
    pub fn resolved_style(&self) -> Style {
        self.style.apply(&Style::default())
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the user's configuration, or defaults when there is none.
pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads `path`. A file that does not parse yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring invalid configuration");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
