//! Fixed viewer camera
//!
//! The viewer stands still; navigation rotates the gallery around it. The
//! camera is placed from `GalleryConfig::camera` and only provides the
//! projection used to turn the cursor into a picking ray.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use vitrine_config::GalleryConfig;

use crate::convert::ray_to_core;

/// Background grey of the gallery (0xcccccc)
const BACKGROUND: Color = Color::srgb(0.8, 0.8, 0.8);

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Plugin spawning the viewer camera
pub struct GalleryCameraPlugin;

impl Plugin for GalleryCameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKGROUND))
            .add_systems(Startup, spawn_camera);
    }
}

fn spawn_camera(mut commands: Commands, config: Res<GalleryConfig>) {
    let camera = &config.camera;
    let position = Vec3::from_array(camera.position);
    let look_at = Vec3::from_array(camera.look_at);

    // Reinhard avoids the tonemapping LUTs (and their zstd dependency)
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_translation(position).looking_at(look_at, Vec3::Y),
        Tonemapping::Reinhard,
        MainCamera,
    ));

    info!(
        "Camera at {:?} looking at {:?} (fov {}°)",
        position, look_at, camera.fov_degrees
    );
}

/// World ray under the cursor, or `None` when the cursor is outside the window
pub(crate) fn cursor_ray(
    window: &Window,
    camera: &Camera,
    camera_transform: &GlobalTransform,
) -> Option<gallery::Ray> {
    let cursor = window.cursor_position()?;
    let ray = camera.viewport_to_world(camera_transform, cursor).ok()?;
    ray_to_core(ray)
}
