//! Pickable registry: what the pointer can hit this frame

use std::collections::BTreeMap;

use glam::{Vec2, Vec3};

use crate::raycast::{ray_quad_intersection, ray_sphere_intersection, Ray};
use crate::types::Placement;

/// Opaque, stable identifier of a pickable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PickHandle(u32);

impl PickHandle {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// What a pickable entry stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickableKind {
    /// An artwork, carrying its item index
    Item(usize),
    PrevControl,
    NextControl,
}

impl PickableKind {
    pub fn is_control(&self) -> bool {
        matches!(self, PickableKind::PrevControl | PickableKind::NextControl)
    }
}

/// Hit-test geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// One-sided rectangle
    Quad {
        center: Vec3,
        normal: Vec3,
        right: Vec3,
        half_size: Vec2,
    },
    Sphere { center: Vec3, radius: f32 },
}

impl Bounds {
    /// Rectangle of `size` at a placement
    pub fn quad(placement: &Placement, size: Vec2) -> Self {
        Bounds::Quad {
            center: placement.position,
            normal: placement.normal(),
            right: placement.right(),
            half_size: size * 0.5,
        }
    }

    /// Ray parameter of the nearest hit, if any
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match *self {
            Bounds::Quad {
                center,
                normal,
                right,
                half_size,
            } => ray_quad_intersection(ray, center, normal, right, half_size),
            Bounds::Sphere { center, radius } => ray_sphere_intersection(ray, center, radius),
        }
    }

    pub fn center(&self) -> Vec3 {
        match *self {
            Bounds::Quad { center, .. } | Bounds::Sphere { center, .. } => center,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickableEntry {
    pub handle: PickHandle,
    pub kind: PickableKind,
    pub bounds: Bounds,
}

/// Handle-ordered set of pickable entries.
///
/// Iteration follows handle order so ties resolve the same way every time.
#[derive(Debug, Clone, Default)]
pub struct PickableRegistry {
    entries: BTreeMap<PickHandle, PickableEntry>,
}

impl PickableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `handle`
    pub fn upsert(&mut self, handle: PickHandle, kind: PickableKind, bounds: Bounds) {
        self.entries.insert(
            handle,
            PickableEntry {
                handle,
                kind,
                bounds,
            },
        );
    }

    pub fn remove(&mut self, handle: PickHandle) -> Option<PickableEntry> {
        self.entries.remove(&handle)
    }

    pub fn get(&self, handle: PickHandle) -> Option<&PickableEntry> {
        self.entries.get(&handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PickableEntry> {
        self.entries.values()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_replaces_entry() {
        let mut registry = PickableRegistry::new();
        let handle = PickHandle::from_raw(3);
        registry.upsert(
            handle,
            PickableKind::Item(3),
            Bounds::Sphere {
                center: Vec3::ZERO,
                radius: 1.0,
            },
        );
        registry.upsert(
            handle,
            PickableKind::Item(3),
            Bounds::Sphere {
                center: Vec3::X,
                radius: 1.0,
            },
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(handle).unwrap().bounds.center(), Vec3::X);
    }

    #[test]
    fn test_iteration_follows_handle_order() {
        let mut registry = PickableRegistry::new();
        let bounds = Bounds::Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
        };
        for raw in [5, 1, 3] {
            registry.upsert(PickHandle::from_raw(raw), PickableKind::Item(raw as usize), bounds);
        }
        let order: Vec<u32> = registry.iter().map(|e| e.handle.raw()).collect();
        assert_eq!(order, vec![1, 3, 5]);

        registry.remove(PickHandle::from_raw(3));
        assert_eq!(registry.len(), 2);
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_control_kinds() {
        assert!(PickableKind::PrevControl.is_control());
        assert!(PickableKind::NextControl.is_control());
        assert!(!PickableKind::Item(0).is_control());
    }
}
