//! Runtime configuration
//!
//! Loaded from an optional JSON file, then overridden by command line flags.
//! Every field has a default so a partial file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::display::WindowSize;
use crate::fractal::{Settings, Viewport};

/// Deepest level accepted; 3^12 leaves is already half a million triangles
pub const MAX_SUPPORTED_DEPTH: u32 = 12;

const DEFAULT_COLOR: [u8; 3] = [255, 191, 0];
const DEFAULT_SCREEN_FRACTION: f32 = 0.8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode config: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub animation: Settings,
    /// Constant ink color (r, g, b)
    pub color: [u8; 3],
    /// Initial window side as a fraction of the desktop, when no size is given
    pub screen_fraction: f32,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub vsync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animation: Settings::default(),
            color: DEFAULT_COLOR,
            screen_fraction: DEFAULT_SCREEN_FRACTION,
            width: None,
            height: None,
            vsync: true,
        }
    }
}

impl Config {
    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let animation = &self.animation;
        if animation.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "max_depth {} exceeds {}",
                animation.max_depth, MAX_SUPPORTED_DEPTH
            )));
        }
        if !(animation.animation_step.is_finite() && animation.animation_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "animation_step must be positive, got {}",
                animation.animation_step
            )));
        }
        if !(animation.min_margin.is_finite() && animation.min_margin >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_margin must be non-negative, got {}",
                animation.min_margin
            )));
        }
        if !(self.screen_fraction > 0.0 && self.screen_fraction <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "screen_fraction must be in (0, 1], got {}",
                self.screen_fraction
            )));
        }
        if self.width == Some(0) || self.height == Some(0) {
            return Err(ConfigError::Invalid("window size must be non-zero".into()));
        }
        let too_big = |side: Option<u32>| side.is_some_and(|s| s > Viewport::MAX_SIDE);
        if too_big(self.width) || too_big(self.height) {
            return Err(ConfigError::Invalid(format!(
                "window sides are limited to {} pixels",
                Viewport::MAX_SIDE
            )));
        }
        Ok(())
    }

    pub fn ink(&self) -> (u8, u8, u8) {
        (self.color[0], self.color[1], self.color[2])
    }

    /// Fixed size when both sides are known, otherwise a share of the desktop.
    /// A single given side makes a square window.
    pub fn window_size(&self) -> WindowSize {
        match (self.width, self.height) {
            (Some(w), Some(h)) => WindowSize::Fixed(w, h),
            (Some(side), None) | (None, Some(side)) => WindowSize::Fixed(side, side),
            (None, None) => WindowSize::DesktopFraction(self.screen_fraction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fractal::FillStyle;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_classic_animation() {
        let config = Config::default();
        assert_eq!(config.animation.max_depth, 8);
        assert_eq!(config.animation.min_margin, 20.0);
        assert_eq!(config.animation.animation_step, 0.03);
        assert_eq!(config.animation.fill_style, FillStyle::Solid);
        assert!(config.validate().is_ok());
        assert_eq!(config.window_size(), WindowSize::DesktopFraction(0.8));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "animation": { "max_depth": 5, "fill_style": "outline" }, "width": 800 }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.animation.max_depth, 5);
        assert_eq!(config.animation.fill_style, FillStyle::Outline);
        assert_eq!(config.animation.animation_step, 0.03);
        assert_eq!(config.color, [255, 191, 0]);
        assert_eq!(config.window_size(), WindowSize::Fixed(800, 800));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sierpinski.json");
        let mut config = Config::default();
        config.animation.max_depth = 4;
        config.animation.fill_style = FillStyle::Outline;
        config.width = Some(1024);
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("malformed.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = Config::default();
        config.animation.max_depth = 13;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.animation.animation_step = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.animation.min_margin = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.screen_fraction = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.height = Some(0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.width = Some(Viewport::MAX_SIDE + 1);
        assert!(config.validate().is_err());
    }
}
