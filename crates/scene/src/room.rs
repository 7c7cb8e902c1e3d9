//! Floor and, in wall-grid mode, the walls the artworks hang on
//!
//! Walls turn with the arrangement, so they are synced from the session
//! rotation like the artworks.

use std::f32::consts::PI;

use bevy::prelude::*;
use gallery::{Arrangement, GallerySession, WallGridLayout};

use crate::convert::placement_transform;
use crate::GallerySet;

/// Margin of floor beyond the outermost artwork
const FLOOR_MARGIN: f32 = 2.0;

/// A wall surface in wall-grid mode
#[derive(Component, Debug, Clone, Copy)]
pub struct RoomWall {
    pub wall: usize,
}

/// Plugin spawning the room geometry
pub struct RoomPlugin;

impl Plugin for RoomPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_room)
            .add_systems(Update, sync_walls.in_set(GallerySet::Sync));
    }
}

/// Distance from the center to the farthest point of the arrangement
fn room_extent(arrangement: &Arrangement) -> f32 {
    match arrangement {
        Arrangement::Radial(radial) => radial.radius,
        // Corner distance of the polygon
        Arrangement::WallGrid(grid) => match grid.wall_count {
            0..=2 => grid.room_radius * std::f32::consts::SQRT_2,
            n => grid.room_radius / (PI / n as f32).cos(),
        },
    }
}

fn spawn_room(
    mut commands: Commands,
    session: Res<GallerySession>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let arrangement = session.settings().arrangement;
    let floor_size = 2.0 * (room_extent(&arrangement) + FLOOR_MARGIN);

    // 0xaaaaaa
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(floor_size, floor_size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.667, 0.667, 0.667),
            perceptual_roughness: 0.8,
            ..default()
        })),
        Name::new("Floor"),
    ));

    let Arrangement::WallGrid(grid) = arrangement else {
        return;
    };

    let wall_mesh = meshes.add(Rectangle::new(grid.wall_length(), 2.0 * grid.height));
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.8, 0.8),
        perceptual_roughness: 0.9,
        ..default()
    });
    for wall in 0..grid.wall_count {
        commands.spawn((
            Mesh3d(wall_mesh.clone()),
            MeshMaterial3d(wall_material.clone()),
            wall_transform(&grid, wall, session.rotation()),
            RoomWall { wall },
            Name::new(format!("Wall {wall}")),
        ));
    }

    info!("Spawned room with {} walls", grid.wall_count);
}

fn sync_walls(session: Res<GallerySession>, mut walls: Query<(&RoomWall, &mut Transform)>) {
    if !session.is_changed() {
        return;
    }
    let Arrangement::WallGrid(grid) = session.settings().arrangement else {
        return;
    };
    for (wall, mut transform) in walls.iter_mut() {
        *transform = wall_transform(&grid, wall.wall, session.rotation());
    }
}

fn wall_transform(grid: &WallGridLayout, wall: usize, rotation: f32) -> Transform {
    placement_transform(&grid.wall_placement(wall, rotation), Vec3::ONE)
}
