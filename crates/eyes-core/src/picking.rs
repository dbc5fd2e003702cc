use crate::camera::Ray;
use glam::{Vec2, Vec3};

/// Axis-aligned quad facing +Z, as used for the textured sprites.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub center: Vec3,
    pub half_extents: Vec2,
}

impl Quad {
    pub fn square(center: Vec3, size: f32, scale: f32) -> Self {
        let half = 0.5 * size * scale;
        Self {
            center,
            half_extents: Vec2::splat(half),
        }
    }
}

/// Intersect a ray with the front face of a quad.
///
/// Returns the world-space hit point. Rays travelling away from the quad, or
/// hitting its back face, miss.
#[inline]
pub fn ray_quad(ray: &Ray, quad: &Quad) -> Option<Vec3> {
    // front face only: the ray must travel toward -Z
    if ray.direction.z >= -1e-6 {
        return None;
    }
    let t = (quad.center.z - ray.origin.z) / ray.direction.z;
    if t < 0.0 {
        return None;
    }
    let hit = ray.at(t);
    let local = hit - quad.center;
    (local.x.abs() <= quad.half_extents.x && local.y.abs() <= quad.half_extents.y).then_some(hit)
}
