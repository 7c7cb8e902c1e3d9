//! Artwork quads and navigation controls
//!
//! Each artwork is a unit rectangle scaled to its frame. Transforms are
//! copied from the session whenever it changes; the session stays the only
//! owner of placements. Images load asynchronously: a loaded image refits
//! the frame to its aspect ratio, a failed one leaves a placeholder color.

use std::f32::consts::FRAC_PI_2;

use bevy::asset::LoadState;
use bevy::prelude::*;
use gallery::glam as core_math;
use gallery::{Direction, GallerySession, Placement};

use crate::convert::placement_transform;
use crate::hover::HOVER_SCALE;
use crate::GallerySet;

/// Shown in place of an image that failed to load
const PLACEHOLDER_COLOR: Color = Color::srgb(0.45, 0.12, 0.12);

const CONTROL_COLOR: Color = Color::srgb(0.15, 0.15, 0.18);

/// An artwork entity, mirroring session item `index`
#[derive(Component, Debug, Clone, Copy)]
pub struct Artwork {
    pub index: usize,
}

/// Image backing an artwork and whether its load has been handled
#[derive(Component, Debug, Clone)]
pub struct ArtworkImage {
    pub handle: Handle<Image>,
    pub resolved: bool,
}

/// A previous/next navigation control
#[derive(Component, Debug, Clone, Copy)]
pub struct NavControl {
    pub direction: Direction,
}

/// Plugin spawning and syncing artworks and controls
pub struct ArtworkPlugin;

impl Plugin for ArtworkPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_artworks)
            .add_systems(Update, watch_artwork_images.in_set(GallerySet::Advance))
            .add_systems(Update, sync_artworks.in_set(GallerySet::Sync));
    }
}

fn spawn_artworks(
    mut commands: Commands,
    session: Res<GallerySession>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let quad = meshes.add(Rectangle::new(1.0, 1.0));
    let hovered = session.hovered();

    for item in session.items() {
        let image: Handle<Image> = asset_server.load(item.metadata.image.clone());
        let material = materials.add(StandardMaterial {
            base_color_texture: Some(image.clone()),
            perceptual_roughness: 0.9,
            ..default()
        });
        let is_hovered = hovered == Some(session.item_handle(item.index));

        commands.spawn((
            Mesh3d(quad.clone()),
            MeshMaterial3d(material),
            placement_transform(&item.placement, frame_scale(item.frame, is_hovered)),
            Artwork { index: item.index },
            ArtworkImage {
                handle: image,
                resolved: false,
            },
            Name::new(item.metadata.title.clone()),
        ));
    }

    let controls = session.settings().controls;
    let cone = meshes.add(Cone::new(controls.radius, controls.radius * 2.0));
    let control_material = materials.add(StandardMaterial {
        base_color: CONTROL_COLOR,
        metallic: 0.3,
        perceptual_roughness: 0.5,
        ..default()
    });

    for direction in [Direction::Previous, Direction::Next] {
        commands.spawn((
            Mesh3d(cone.clone()),
            MeshMaterial3d(control_material.clone()),
            control_transform(&session.control_placement(direction), direction),
            control_visibility(session.controls_visible()),
            NavControl { direction },
            Name::new(format!("{direction:?} control")),
        ));
    }

    info!("Spawned {} artworks and navigation controls", session.len());
}

/// Refit frames once images load, fall back to a placeholder when they fail
fn watch_artwork_images(
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut session: ResMut<GallerySession>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(&Artwork, &mut ArtworkImage, &MeshMaterial3d<StandardMaterial>)>,
) {
    for (artwork, mut artwork_image, material) in query.iter_mut() {
        if artwork_image.resolved {
            continue;
        }

        match asset_server.load_state(artwork_image.handle.id()) {
            LoadState::Loaded => {
                artwork_image.resolved = true;
                let Some(image) = images.get(&artwork_image.handle) else {
                    continue;
                };
                let size = image.size_f32();
                if size.y > 0.0 && session.set_item_aspect(artwork.index, size.x / size.y) {
                    debug!(
                        "Artwork {} refit to {}x{} image",
                        artwork.index, size.x, size.y
                    );
                }
            }
            LoadState::Failed(err) => {
                artwork_image.resolved = true;
                let title = session
                    .item(artwork.index)
                    .map(|item| item.metadata.title.as_str())
                    .unwrap_or_default();
                warn!("Failed to load image for \"{}\": {}", title, err);
                if let Some(mut placeholder) = materials.get_mut(&material.0) {
                    placeholder.base_color_texture = None;
                    placeholder.base_color = PLACEHOLDER_COLOR;
                }
            }
            _ => {}
        }
    }
}

/// Copy session placements onto artwork and control transforms
fn sync_artworks(
    session: Res<GallerySession>,
    mut artworks: Query<(&Artwork, &mut Transform), Without<NavControl>>,
    mut controls: Query<(&NavControl, &mut Transform, &mut Visibility), Without<Artwork>>,
) {
    if !session.is_changed() {
        return;
    }

    let hovered = session.hovered();
    for (artwork, mut transform) in artworks.iter_mut() {
        let Some(item) = session.item(artwork.index) else {
            continue;
        };
        let is_hovered = hovered == Some(session.item_handle(artwork.index));
        *transform = placement_transform(&item.placement, frame_scale(item.frame, is_hovered));
    }

    let visibility = control_visibility(session.controls_visible());
    for (control, mut transform, mut control_vis) in controls.iter_mut() {
        let placement = session.control_placement(control.direction);
        *transform = control_transform(&placement, control.direction);
        control_vis.set_if_neq(visibility);
    }
}

/// Scale of a unit quad showing `frame`, enlarged while hovered
pub(crate) fn frame_scale(frame: core_math::Vec2, hovered: bool) -> Vec3 {
    let factor = if hovered { HOVER_SCALE } else { 1.0 };
    Vec3::new(frame.x * factor, frame.y * factor, 1.0)
}

/// Cone transform pointing along the item's right axis for next, left for previous
fn control_transform(placement: &Placement, direction: Direction) -> Transform {
    let mut transform = placement_transform(placement, Vec3::ONE);
    // Cones point up +Y; roll them onto ±X
    let roll = match direction {
        Direction::Previous => FRAC_PI_2,
        Direction::Next => -FRAC_PI_2,
    };
    transform.rotation *= Quat::from_rotation_z(roll);
    transform
}

fn control_visibility(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}
