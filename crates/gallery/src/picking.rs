//! Picking service: nearest registry entry under the pointer

use glam::Vec2;

use crate::raycast::{CameraState, Ray};
use crate::registry::{PickHandle, PickableKind, PickableRegistry};

/// Result of a successful pick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub handle: PickHandle,
    pub kind: PickableKind,
    /// Ray parameter of the hit
    pub distance: f32,
}

/// Pick with a pointer in normalized device coordinates.
///
/// Returns `None` for an empty registry, a miss, or a degenerate camera.
pub fn pick(
    pointer_ndc: Vec2,
    camera: &CameraState,
    registry: &PickableRegistry,
) -> Option<PickHandle> {
    let ray = camera.ray_from_ndc(pointer_ndc)?;
    pick_ray(&ray, registry).map(|hit| hit.handle)
}

/// Pick with a world-space ray, returning the nearest hit.
///
/// Equal distances keep the lower handle.
pub fn pick_ray(ray: &Ray, registry: &PickableRegistry) -> Option<PickHit> {
    let mut closest: Option<PickHit> = None;

    for entry in registry.iter() {
        let Some(distance) = entry.bounds.intersect(ray) else {
            continue;
        };
        if !distance.is_finite() || distance < 0.0 {
            continue;
        }
        let nearer = closest.is_none_or(|hit| distance < hit.distance);
        if nearer {
            closest = Some(PickHit {
                handle: entry.handle,
                kind: entry.kind,
                distance,
            });
        }
    }

    closest
}
