//! Layout engine: deterministic item placement.
//!
//! Angles follow one convention everywhere: an item at angle `a` sits at
//! `(r·sin a, h, -r·cos a)`, so angle 0 is straight ahead of a viewer at the
//! origin looking down -Z, and its yaw is `-a` so the face points back at the
//! origin. The rotation parameter is added to every item's angle. Placements
//! are always recomputed from the parameter, never accumulated.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::GalleryError;
use crate::types::Placement;

/// Upper bound on wall surfaces in wall-grid mode
pub const MAX_WALLS: usize = 8;

/// Items evenly spaced on a ring around the viewer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialLayout {
    /// Ring radius
    pub radius: f32,
    /// Height of item centers
    pub height: f32,
}

impl Default for RadialLayout {
    fn default() -> Self {
        Self {
            radius: 4.0,
            height: 1.6,
        }
    }
}

/// Items hung round robin on the walls of a regular room
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallGridLayout {
    /// Number of wall surfaces (1 = front only, 2 = front and back, 3+ = polygon sides)
    pub wall_count: usize,
    /// Distance from the room center to each wall
    pub room_radius: f32,
    /// Height of item centers
    pub height: f32,
    /// Clear margin kept at both ends of each wall
    pub inset: f32,
    /// Gap between the wall surface and the hung item
    pub surface_offset: f32,
}

impl Default for WallGridLayout {
    fn default() -> Self {
        Self {
            wall_count: 4,
            room_radius: 5.0,
            height: 2.5,
            inset: 0.75,
            surface_offset: 0.05,
        }
    }
}

impl WallGridLayout {
    /// Usable length of one wall
    pub fn wall_length(&self) -> f32 {
        match self.wall_count {
            0..=2 => 2.0 * self.room_radius,
            n => 2.0 * self.room_radius * (PI / n as f32).tan(),
        }
    }

    /// Bearing of the wall's center at rotation 0
    pub fn wall_angle(&self, wall: usize) -> f32 {
        TAU * wall as f32 / self.wall_count.max(1) as f32
    }

    /// Center of a wall surface at item height, facing into the room
    pub fn wall_placement(&self, wall: usize, rotation: f32) -> Placement {
        let angle = self.wall_angle(wall) + rotation;
        let center = Vec3::new(0.0, self.height, -self.room_radius);
        Placement::new(Quat::from_rotation_y(-angle) * center, -angle)
    }

    /// Number of items that land on `wall` for a collection of `count`
    pub fn items_on_wall(&self, wall: usize, count: usize) -> usize {
        let walls = self.wall_count.max(1);
        if wall >= walls {
            return 0;
        }
        (count + walls - 1 - wall) / walls
    }

    /// Offset along the wall's tangent axis for a slot
    fn slot_offset(&self, slot: usize, slots: usize) -> f32 {
        let usable = (self.wall_length() - 2.0 * self.inset).max(0.0);
        let slots = slots.max(1) as f32;
        -usable * 0.5 + usable * (slot as f32 + 0.5) / slots
    }

    /// Item position for a wall facing straight ahead, before the wall's bearing is applied
    fn local_position(&self, index: usize, count: usize) -> (usize, Vec3) {
        let walls = self.wall_count.max(1);
        let wall = index % walls;
        let slot = index / walls;
        let along = self.slot_offset(slot, self.items_on_wall(wall, count));
        let depth = self.room_radius - self.surface_offset;
        (wall, Vec3::new(along, self.height, -depth))
    }
}

/// Arrangement strategy, selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Arrangement {
    Radial(RadialLayout),
    WallGrid(WallGridLayout),
}

impl Default for Arrangement {
    fn default() -> Self {
        Arrangement::Radial(RadialLayout::default())
    }
}

impl Arrangement {
    /// Reject parameters that would produce overlapping or undefined placements
    pub fn validate(&self) -> Result<(), GalleryError> {
        match self {
            Arrangement::Radial(radial) => {
                if !radial.radius.is_finite() || radial.radius <= 0.0 {
                    return Err(GalleryError::InvalidRadius(radial.radius));
                }
                check_dimension("height", radial.height)?;
            }
            Arrangement::WallGrid(grid) => {
                if grid.wall_count == 0 || grid.wall_count > MAX_WALLS {
                    return Err(GalleryError::InvalidWallCount(grid.wall_count));
                }
                if !grid.room_radius.is_finite() || grid.room_radius <= 0.0 {
                    return Err(GalleryError::InvalidRadius(grid.room_radius));
                }
                check_dimension("height", grid.height)?;
                check_dimension("inset", grid.inset)?;
                check_dimension("surface offset", grid.surface_offset)?;
                // Items on one wall collapse onto a single point without usable length
                let wall_length = grid.wall_length();
                if grid.inset >= wall_length * 0.5 {
                    return Err(GalleryError::InsetTooLarge {
                        inset: grid.inset,
                        wall_length,
                    });
                }
                if grid.surface_offset >= grid.room_radius {
                    return Err(GalleryError::InvalidDimension {
                        name: "surface offset",
                        value: grid.surface_offset,
                    });
                }
            }
        }
        Ok(())
    }

    /// Placement of item `index` out of `count` with the arrangement rotated by `rotation`
    pub fn placement(&self, index: usize, count: usize, rotation: f32) -> Placement {
        let count = count.max(1);
        match self {
            Arrangement::Radial(radial) => {
                let angle = radial_base_angle(index, count) + rotation;
                Placement::new(
                    Vec3::new(
                        radial.radius * angle.sin(),
                        radial.height,
                        -radial.radius * angle.cos(),
                    ),
                    -angle,
                )
            }
            Arrangement::WallGrid(grid) => {
                let (wall, local) = grid.local_position(index, count);
                let angle = grid.wall_angle(wall) + rotation;
                Placement::new(Quat::from_rotation_y(-angle) * local, -angle)
            }
        }
    }

    /// Bearing of item `index` at rotation 0, in `[0, 2π)`.
    ///
    /// Rotating the arrangement by `-heading` brings the item straight ahead.
    pub fn heading(&self, index: usize, count: usize) -> f32 {
        let count = count.max(1);
        match self {
            Arrangement::Radial(_) => radial_base_angle(index, count),
            Arrangement::WallGrid(grid) => {
                let (wall, local) = grid.local_position(index, count);
                let bearing = grid.wall_angle(wall) + local.x.atan2(-local.z);
                bearing.rem_euclid(TAU)
            }
        }
    }
}

/// Finite and non-negative
pub(crate) fn check_dimension(name: &'static str, value: f32) -> Result<(), GalleryError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GalleryError::InvalidDimension { name, value })
    }
}

/// Base angle of item `index` on a radial ring: `2π·index/count`
pub fn radial_base_angle(index: usize, count: usize) -> f32 {
    if count <= 1 {
        return 0.0;
    }
    TAU * (index % count) as f32 / count as f32
}

/// Placement of one item. Identical inputs always produce identical output.
pub fn compute_placement(
    index: usize,
    count: usize,
    arrangement: &Arrangement,
    rotation: f32,
) -> Placement {
    arrangement.placement(index, count, rotation)
}

/// Fit an image of the given aspect ratio (width / height) inside `max`
pub fn fit_frame(aspect: f32, max: Vec2) -> Vec2 {
    if !aspect.is_finite() || aspect <= 0.0 {
        return max;
    }
    let mut width = max.x;
    let mut height = width / aspect;
    if height > max.y {
        height = max.y;
        width = height * aspect;
    }
    Vec2::new(width, height)
}
