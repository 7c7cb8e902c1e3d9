//! Shared configuration for Vitrine
//!
//! This crate is the single source of truth for window dimensions and the
//! gallery description: which artworks to show, how they are arranged, how
//! navigation animates and where the camera stands. Configuration is read
//! from a JSON file named by `VITRINE_CONFIG`; without it the built-in
//! Michelangelo collection is used.

use std::path::{Path, PathBuf};
use std::time::Duration;

use gallery::{
    Arrangement, ControlStyle, Easing, GalleryError, GallerySession, GallerySettings,
    ItemMetadata,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Environment variable naming the gallery configuration file
pub const CONFIG_ENV_VAR: &str = "VITRINE_CONFIG";

/// Default window width in pixels
pub const DEFAULT_WIDTH: u32 = 1920;

/// Default window height in pixels
pub const DEFAULT_HEIGHT: u32 = 1080;

/// Default scale factor (1.0 = no scaling)
pub const DEFAULT_SCALE: f32 = 1.0;

/// Default transition length in milliseconds
pub const DEFAULT_TRANSITION_MS: u64 = 1500;

/// Errors produced while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid gallery configuration: {0}")]
    Invalid(#[from] GalleryError),

    #[error("invalid camera field of view: {0} degrees (expected 0 < fov < 180)")]
    InvalidFov(f32),

    #[error("invalid display scale: {0} (must be finite and > 0)")]
    InvalidScale(f32),
}

/// Display configuration for window and rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct DisplayConfig {
    /// Window title
    pub title: String,
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Scale factor for DPI scaling
    pub scale: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Vitrine".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
        }
    }
}

impl DisplayConfig {
    /// Scale factor to force on the window, `None` to follow the OS setting
    pub fn scale_factor_override(&self) -> Option<f32> {
        (self.scale != DEFAULT_SCALE).then_some(self.scale)
    }
}

/// Largest frame an artwork may occupy, in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub max_width: f32,
    pub max_height: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_width: 3.0,
            max_height: 2.4,
        }
    }
}

/// Previous/next control geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Pick radius of each control
    pub radius: f32,
    /// Gap between the artwork frame and the control
    pub gap: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        let style = ControlStyle::default();
        Self {
            radius: style.radius,
            gap: style.gap,
        }
    }
}

/// Viewer camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
    /// Vertical field of view
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 1.6, 0.0],
            look_at: [0.0, 1.6, -4.0],
            fov_degrees: 75.0,
        }
    }
}

/// Complete gallery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(Resource))]
#[serde(default)]
pub struct GalleryConfig {
    pub display: DisplayConfig,
    /// Ordered artwork collection
    pub artworks: Vec<ItemMetadata>,
    pub arrangement: Arrangement,
    pub transition_duration_ms: u64,
    pub easing: Easing,
    pub frame: FrameConfig,
    pub controls: ControlsConfig,
    pub camera: CameraConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            artworks: michelangelo_collection(),
            arrangement: Arrangement::default(),
            transition_duration_ms: DEFAULT_TRANSITION_MS,
            easing: Easing::default(),
            frame: FrameConfig::default(),
            controls: ControlsConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Load from the file named by `VITRINE_CONFIG`, or the defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => {
                info!("{} not set, using the built-in collection", CONFIG_ENV_VAR);
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        info!(
            "Loaded gallery config from {} ({} artworks)",
            path.display(),
            config.artworks.len()
        );
        Ok(config)
    }

    /// Parse and validate JSON text. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.artworks.is_empty() {
            return Err(GalleryError::EmptyCollection.into());
        }
        self.settings().validate()?;
        let fov = self.camera.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::InvalidFov(fov));
        }
        let scale = self.display.scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::InvalidScale(scale));
        }
        Ok(())
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    /// Session settings described by this config
    pub fn settings(&self) -> GallerySettings {
        GallerySettings {
            arrangement: self.arrangement,
            transition: self.transition_duration(),
            easing: self.easing,
            max_frame: [self.frame.max_width, self.frame.max_height].into(),
            controls: ControlStyle {
                radius: self.controls.radius,
                gap: self.controls.gap,
            },
        }
    }

    /// Build a fresh gallery session over the configured artworks
    pub fn build_session(&self) -> Result<GallerySession, ConfigError> {
        Ok(GallerySession::new(self.artworks.clone(), self.settings())?)
    }
}

/// The six Sistine Chapel works the gallery ships with
pub fn michelangelo_collection() -> Vec<ItemMetadata> {
    [
        (
            "The Creation of Adam",
            "Fresco on the Sistine Chapel ceiling, c. 1508-1512.",
            "artworks/the_creation_of_adam.jpg",
        ),
        (
            "The Last Judgment",
            "Fresco on the altar wall of the Sistine Chapel, 1536-1541.",
            "artworks/the_last_judgement.jpg",
        ),
        (
            "The Prophet Jeremiah",
            "One of the seven prophets on the Sistine Chapel ceiling.",
            "artworks/the_prophet_jeremiah.jpg",
        ),
        (
            "The Libyan Sibyl",
            "One of the five sibyls on the Sistine Chapel ceiling.",
            "artworks/the_libyan_sibyl.jpg",
        ),
        (
            "The Deluge",
            "Central ceiling panel depicting the Great Flood.",
            "artworks/the_deluge.jpg",
        ),
        (
            "Separation of Light and Darkness",
            "The first of the nine Genesis panels on the ceiling.",
            "artworks/the_separation_of_light_and_darkness.jpg",
        ),
    ]
    .into_iter()
    .map(|(title, description, image)| ItemMetadata::new(title, description, image))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery::WallGridLayout;

    #[test]
    fn test_default_config() {
        let config = GalleryConfig::default();
        assert_eq!(config.display.width, DEFAULT_WIDTH);
        assert_eq!(config.display.height, DEFAULT_HEIGHT);
        assert_eq!(config.artworks.len(), 6);
        assert_eq!(config.transition_duration(), Duration::from_millis(1500));
        assert!(config.validate().is_ok());
        assert_eq!(config.build_session().unwrap().len(), 6);
    }

    #[test]
    fn test_scale_override() {
        let mut config = DisplayConfig::default();
        assert_eq!(config.scale_factor_override(), None);
        config.scale = 2.0;
        assert_eq!(config.scale_factor_override(), Some(2.0));

        let err = GalleryConfig::from_json_str(r#"{ "display": { "scale": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidScale(_)));
    }

    #[test]
    fn test_parse_wall_grid() {
        let config = GalleryConfig::from_json_str(
            r#"{
                "artworks": [
                    { "title": "A", "image": "a.png" },
                    { "title": "B", "description": "second", "image": "b.png" }
                ],
                "arrangement": { "mode": "wall_grid", "wall_count": 3, "room_radius": 6.0 },
                "transition_duration_ms": 800,
                "easing": "ease_in_out_sine"
            }"#,
        )
        .unwrap();
        assert_eq!(config.artworks.len(), 2);
        assert_eq!(config.artworks[0].description, "");
        assert_eq!(
            config.arrangement,
            Arrangement::WallGrid(WallGridLayout {
                wall_count: 3,
                room_radius: 6.0,
                ..WallGridLayout::default()
            })
        );
        let settings = config.settings();
        assert_eq!(settings.transition, Duration::from_millis(800));
        assert_eq!(settings.easing, Easing::EaseInOutSine);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = GalleryConfig::from_json_str(r#"{ "arrangement": { "mode": "spiral" } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GalleryConfig::from_json_str(r#"{ "artworks": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(GalleryError::EmptyCollection)));

        let err = GalleryConfig::from_json_str(
            r#"{ "arrangement": { "mode": "wall_grid", "wall_count": 9 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(GalleryError::InvalidWallCount(9))));

        let err = GalleryConfig::from_json_str(r#"{ "transition_duration_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(GalleryError::InvalidDuration)));

        let err = GalleryConfig::from_json_str(r#"{ "camera": { "fov_degrees": 190.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFov(_)));

        let err = GalleryConfig::from_json_str(
            r#"{ "arrangement": { "mode": "wall_grid", "wall_count": 1, "inset": 6.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(GalleryError::InsetTooLarge { .. })
        ));

        let err = GalleryConfig::from_json_str(r#"{ "controls": { "radius": -0.25 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(GalleryError::InvalidControlRadius(_))
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = GalleryConfig::load("/nonexistent/vitrine.json").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/vitrine.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
