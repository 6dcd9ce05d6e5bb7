//! Configuration file support for movesel.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/movesel/config.toml`. Settings include the selection outline
//! style, how moved pixels snap to the grid on commit, and the flatten background.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, OffsetSnap};
pub use types::{CommitConfig, RenderConfig, SelectionConfig};

use crate::draw::render::{OutlineStyle, RenderOptions};
use crate::draw::color::TRANSPARENT;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [selection]
/// outline_width = 1.0
/// dash_length = 4.0
/// outline_color = "white"
///
/// [commit]
/// offset_snap = "truncate"
///
/// [render]
/// background = "none"
/// ```
#[derive(Debug, Serialize, Deserialize, Default, schemars::JsonSchema)]
pub struct Config {
    /// Selection outline appearance
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Commit behavior for floating pixels
    #[serde(default)]
    pub commit: CommitConfig,

    /// Flattened output settings
    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `selection.outline_width`: 0.5 - 10.0
    /// - `selection.dash_length`: 1.0 - 50.0
    fn validate_and_clamp(&mut self) {
        if !(0.5..=10.0).contains(&self.selection.outline_width) {
            log::warn!(
                "Invalid outline_width {:.1}, clamping to 0.5-10.0 range",
                self.selection.outline_width
            );
            self.selection.outline_width = self.selection.outline_width.clamp(0.5, 10.0);
        }

        if !(1.0..=50.0).contains(&self.selection.dash_length) {
            log::warn!(
                "Invalid dash_length {:.1}, clamping to 1.0-50.0 range",
                self.selection.dash_length
            );
            self.selection.dash_length = self.selection.dash_length.clamp(1.0, 50.0);
        }
    }

    /// Returns the default path of the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("movesel");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from `path`, or from the default location when `None`.
    ///
    /// A missing file at the default location yields defaults; a missing file that
    /// was named explicitly is an error. All loaded values are validated and clamped.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = Self::get_config_path()?;
                if !default_path.exists() {
                    info!("Config file not found, using defaults");
                    debug!("Expected config at: {}", default_path.display());
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(config_str)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Outline style derived from the `[selection]` section.
    pub fn outline_style(&self) -> OutlineStyle {
        OutlineStyle {
            width: self.selection.outline_width,
            dash_length: self.selection.dash_length,
            color: self.selection.outline_color.to_color(),
        }
    }

    /// Flatten options; the outline is only drawn when `show_outline` is set.
    pub fn render_options(&self, show_outline: bool) -> RenderOptions {
        RenderOptions {
            background: self.render.background.to_color_or(TRANSPARENT),
            outline: show_outline.then(|| self.outline_style()),
            snap: self.commit.offset_snap,
        }
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
