//! Bevy host for the Vitrine gallery
//!
//! Spawns the room, artworks and navigation controls from the
//! [`GallerySession`] resource, forwards window input to it, ticks it with
//! Bevy's clock and mirrors its placements onto entities. The app inserts
//! `GalleryConfig`, `DisplayConfig` and the session before adding
//! [`GalleryScenePlugin`].

use bevy::prelude::*;
use gallery::GallerySession;

mod artwork;
mod camera;
mod convert;
mod hover;
mod input;
mod lighting;
mod navigation;
mod room;

pub use artwork::{Artwork, ArtworkImage, ArtworkPlugin, NavControl};
pub use camera::{GalleryCameraPlugin, MainCamera};
pub use hover::{HoverChanged, HoverPlugin, HOVER_SCALE};
pub use input::GalleryInputPlugin;
pub use lighting::{LightingPlugin, LightingSettings, SceneLighting, SunLight};
pub use navigation::{ArtworkSettled, GalleryNavigationPlugin};
pub use room::{RoomPlugin, RoomWall};

/// System ordering within a frame
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GallerySet {
    /// Keyboard, wheel and click commands
    Input,
    /// Navigation tick and image-load watching
    Advance,
    /// Pointer hover against the fresh placements
    Hover,
    /// Copy placements onto entity transforms
    Sync,
}

pub struct GalleryScenePlugin;

impl Plugin for GalleryScenePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                GallerySet::Input,
                GallerySet::Advance,
                GallerySet::Hover,
                GallerySet::Sync,
            )
                .chain(),
        );

        app.add_plugins(GalleryCameraPlugin);
        app.add_plugins(LightingPlugin);
        app.add_plugins(RoomPlugin);
        app.add_plugins(ArtworkPlugin);
        app.add_plugins(GalleryInputPlugin);
        app.add_plugins(GalleryNavigationPlugin);
        app.add_plugins(HoverPlugin);

        app.add_systems(Startup, log_collection);
    }
}

fn log_collection(session: Res<GallerySession>) {
    info!(
        "Gallery ready: {} artworks, showing \"{}\"",
        session.len(),
        session.current_item().metadata.title
    );
}
