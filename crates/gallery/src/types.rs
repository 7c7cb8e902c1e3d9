//! Core gallery data types

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Descriptive data attached to an artwork
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMetadata {
    /// Display title
    pub title: String,
    /// Short description shown when the item settles
    #[serde(default)]
    pub description: String,
    /// Asset path of the artwork image
    pub image: String,
}

impl ItemMetadata {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: image.into(),
        }
    }
}

/// World-space position and facing of an item.
///
/// Orientation is a rotation about +Y. The unrotated item faces +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    /// Rotation about the Y axis in radians
    pub yaw: f32,
}

impl Placement {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    /// Orientation as a quaternion
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Direction the visible face points towards
    pub fn normal(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    /// Local +X axis of the item in world space
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }
}

/// An artwork in the gallery.
///
/// Created once per session. Only `placement` and `frame` change afterwards.
#[derive(Debug, Clone)]
pub struct GalleryItem {
    pub index: usize,
    pub metadata: ItemMetadata,
    /// World-space width and height of the displayed frame
    pub frame: Vec2,
    pub placement: Placement,
}

/// Carousel step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Minimum wheel delta (in lines) that counts as a step
    pub const WHEEL_DEAD_ZONE: f32 = 0.5;

    /// -1 for previous, +1 for next
    pub fn sign(self) -> i32 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }

    /// Map a vertical wheel delta to a step. Scrolling down advances.
    pub fn from_wheel(delta_y: f32) -> Option<Self> {
        if !delta_y.is_finite() || delta_y.abs() < Self::WHEEL_DEAD_ZONE {
            return None;
        }
        if delta_y < 0.0 {
            Some(Direction::Next)
        } else {
            Some(Direction::Previous)
        }
    }
}

/// Reduce any integer index into `[0, count)`.
///
/// `count` must be non-zero.
pub fn wrap_index(index: isize, count: usize) -> usize {
    index.rem_euclid(count as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_index_both_directions() {
        assert_eq!(wrap_index(0, 6), 0);
        assert_eq!(wrap_index(6, 6), 0);
        assert_eq!(wrap_index(7, 6), 1);
        assert_eq!(wrap_index(-1, 6), 5);
        assert_eq!(wrap_index(-13, 6), 5);
    }

    #[test]
    fn test_wheel_dead_zone() {
        assert_eq!(Direction::from_wheel(0.1), None);
        assert_eq!(Direction::from_wheel(-0.2), None);
        assert_eq!(Direction::from_wheel(f32::NAN), None);
        assert_eq!(Direction::from_wheel(-1.0), Some(Direction::Next));
        assert_eq!(Direction::from_wheel(3.0), Some(Direction::Previous));
    }

    #[test]
    fn test_placement_axes() {
        let placement = Placement::new(Vec3::ZERO, 0.0);
        assert!((placement.normal() - Vec3::Z).length() < 1e-6);
        assert!((placement.right() - Vec3::X).length() < 1e-6);
    }
}
