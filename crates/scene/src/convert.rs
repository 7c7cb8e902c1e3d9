//! Conversions between the gallery core's math types and Bevy's

use bevy::prelude::*;
use gallery::glam as core_math;
use gallery::Placement;

pub(crate) fn vec3_to_bevy(v: core_math::Vec3) -> Vec3 {
    Vec3::from_array(v.to_array())
}

pub(crate) fn vec3_to_core(v: Vec3) -> core_math::Vec3 {
    core_math::Vec3::from_array(v.to_array())
}

/// Transform for an entity hung at `placement`
pub(crate) fn placement_transform(placement: &Placement, scale: Vec3) -> Transform {
    Transform {
        translation: vec3_to_bevy(placement.position),
        rotation: Quat::from_rotation_y(placement.yaw),
        scale,
    }
}

/// Convert a Bevy picking ray into the core's ray
pub(crate) fn ray_to_core(ray: Ray3d) -> Option<gallery::Ray> {
    gallery::Ray::new(vec3_to_core(ray.origin), vec3_to_core(ray.direction.as_vec3()))
}
