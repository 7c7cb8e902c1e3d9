//! Pointer hover tracking
//!
//! Re-picks under the cursor every frame, so artworks turning under a still
//! pointer update hover too. Hover never triggers navigation.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use gallery::{GallerySession, HoverEvent, PickableKind};

use crate::camera::{cursor_ray, MainCamera};
use crate::GallerySet;

/// Scale applied to the hovered artwork
pub const HOVER_SCALE: f32 = 1.2;

/// Written when the hovered pickable changes
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverChanged {
    pub left: Option<PickableKind>,
    pub entered: Option<PickableKind>,
}

/// Plugin tracking what the cursor is over
pub struct HoverPlugin;

impl Plugin for HoverPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<HoverChanged>()
            .add_systems(Update, track_hover.in_set(GallerySet::Hover));
    }
}

fn track_hover(
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut session: ResMut<GallerySession>,
    mut hover_events: MessageWriter<HoverChanged>,
) {
    let ray = match (window_query.single(), camera_query.single()) {
        (Ok(window), Ok((camera, camera_transform))) => {
            cursor_ray(window, camera, camera_transform)
        }
        _ => None,
    };

    // Compare before taking a mutable borrow of the session
    let picked = ray
        .as_ref()
        .and_then(|ray| session.pick_ray(ray))
        .map(|hit| hit.handle);
    if picked == session.hovered() {
        return;
    }

    let Some(change) = session.pointer_moved(ray.as_ref()) else {
        return;
    };

    for event in change.events() {
        match event {
            HoverEvent::Enter(handle) => {
                if let Some(PickableKind::Item(index)) = session.kind_of(handle) {
                    if let Some(item) = session.item(index) {
                        info!("Hovering \"{}\"", item.metadata.title);
                    }
                }
            }
            HoverEvent::Leave(handle) => debug!("Hover left {:?}", handle),
        }
    }

    hover_events.write(HoverChanged {
        left: change.left.and_then(|handle| session.kind_of(handle)),
        entered: change.entered.and_then(|handle| session.kind_of(handle)),
    });
}
