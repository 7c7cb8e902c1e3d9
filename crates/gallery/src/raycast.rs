//! Pointer rays and ray-bounds intersection.
//!
//! Rays come either from a [`CameraState`] and a normalized device coordinate
//! or straight from a host engine that already unprojects the cursor.

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

/// Epsilon for floating point comparisons
const EPSILON: f32 = 1e-6;

/// A world-space ray with a normalized direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing the direction. Returns `None` for a zero direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Ray from `origin` passing through `target`
    pub fn towards(origin: Vec3, target: Vec3) -> Option<Self> {
        Self::new(origin, target - origin)
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// View and projection parameters needed to turn a pointer into a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// World to view transform
    pub view: Mat4,
    /// View to clip transform (right-handed, depth 0..1)
    pub projection: Mat4,
}

impl CameraState {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self { view, projection }
    }

    /// Perspective camera at `eye` looking at `target` with +Y up
    pub fn perspective(
        eye: Vec3,
        target: Vec3,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            view: Mat4::look_at_rh(eye, target, Vec3::Y),
            projection: Mat4::perspective_rh(fov_y, aspect, near, far),
        }
    }

    fn clip_from_world(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Unproject a normalized device coordinate into a world ray.
    ///
    /// The origin lies on the near plane. Returns `None` when the camera
    /// matrices are degenerate.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray> {
        let clip_from_world = self.clip_from_world();
        if clip_from_world.determinant().abs() < EPSILON * EPSILON {
            return None;
        }
        let world_from_clip = clip_from_world.inverse();
        let near = world_from_clip.project_point3(ndc.extend(0.0));
        let far = world_from_clip.project_point3(ndc.extend(1.0));
        if !near.is_finite() || !far.is_finite() {
            return None;
        }
        Ray::new(near, far - near)
    }

    /// Project a world point into normalized device coordinates.
    ///
    /// Returns `None` for points behind the camera.
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.clip_from_world() * point.extend(1.0);
        if clip.w <= EPSILON {
            return None;
        }
        Some(clip.xy() / clip.w)
    }
}

/// Convert a viewport pixel position (origin top-left) into NDC (origin center, +Y up)
pub fn ndc_from_viewport(position: Vec2, viewport_size: Vec2) -> Option<Vec2> {
    if viewport_size.x <= 0.0 || viewport_size.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        position.x / viewport_size.x * 2.0 - 1.0,
        1.0 - position.y / viewport_size.y * 2.0,
    ))
}

/// Ray against a one-sided rectangle.
///
/// Only hits on the face `normal` points out of count, so items seen from
/// behind are not pickable. Returns the ray parameter of the hit.
pub fn ray_quad_intersection(
    ray: &Ray,
    center: Vec3,
    normal: Vec3,
    right: Vec3,
    half_size: Vec2,
) -> Option<f32> {
    let denom = ray.direction.dot(normal);
    // Parallel to the plane, or approaching from behind
    if denom > -EPSILON {
        return None;
    }

    let t = (center - ray.origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }

    let local = ray.at(t) - center;
    let up = normal.cross(right);
    if local.dot(right).abs() > half_size.x || local.dot(up).abs() > half_size.y {
        return None;
    }

    Some(t)
}

/// Ray against a sphere. Returns the distance to the closest non-negative hit.
pub fn ray_sphere_intersection(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t1 = (-b - sqrt_d) / (2.0 * a);
    let t2 = (-b + sqrt_d) / (2.0 * a);

    // Origin inside the sphere yields t1 < 0 <= t2
    if t1 >= 0.0 {
        Some(t1)
    } else if t2 >= 0.0 {
        Some(t2)
    } else {
        None
    }
}
