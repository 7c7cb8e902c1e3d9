//! Drives the gallery's navigation clock from Bevy's real (wall-clock) time

use bevy::prelude::*;
use gallery::{GallerySession, Settled};

use crate::GallerySet;

/// Written once each time a transition settles on an artwork
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ArtworkSettled {
    pub index: usize,
    pub title: String,
}

/// Plugin advancing navigation transitions every frame
pub struct GalleryNavigationPlugin;

impl Plugin for GalleryNavigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ArtworkSettled>()
            .add_systems(Update, advance_gallery.in_set(GallerySet::Advance));
    }
}

/// Tick the running transition and toggle the controls around it
fn advance_gallery(
    time: Res<Time<Real>>,
    mut session: ResMut<GallerySession>,
    mut settled_events: MessageWriter<ArtworkSettled>,
) {
    // Only borrow mutably while something moves, so change detection stays quiet at rest
    if session.navigation().is_transitioning() {
        if let Some(Settled { index }) = session.tick(time.elapsed()) {
            let title = session
                .item(index)
                .map(|item| item.metadata.title.clone())
                .unwrap_or_default();
            info!("Now showing \"{}\" ({}/{})", title, index + 1, session.len());
            settled_events.write(ArtworkSettled { index, title });
        }
    }

    // Controls are hidden (and unpickable) while the ring turns
    let show_controls = !session.navigation().is_transitioning();
    if session.controls_visible() != show_controls {
        session.set_controls_visible(show_controls);
    }
}
