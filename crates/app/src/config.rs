//! Startup configuration: loads the gallery description and builds the session

use gallery::GallerySession;
use tracing::info;
use vitrine_config::{ConfigError, DisplayConfig, GalleryConfig};

/// Everything the app needs before Bevy starts
pub struct StartupState {
    pub display: DisplayConfig,
    pub config: GalleryConfig,
    pub session: GallerySession,
}

impl StartupState {
    /// Load configuration from `VITRINE_CONFIG` (or defaults) and validate it
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = GalleryConfig::from_env()?;
        let session = config.build_session()?;
        info!(
            "Gallery configured with {} artworks, {:?} easing over {:?}",
            session.len(),
            config.easing,
            config.transition_duration()
        );
        Ok(Self {
            display: config.display.clone(),
            config,
            session,
        })
    }
}
