//! Camera description and pointer ray casting.
//!
//! Rays follow the usual picking convention: a perspective camera casts from
//! its eye through the unprojected pointer, an orthographic camera casts from
//! the unprojected point on the near plane straight along its view direction.

use glam::{Mat4, Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Perspective {
        fovy_radians: f32,
        znear: f32,
        zfar: f32,
    },
    /// `half_height` is the world-space distance from the view centre to the
    /// top edge; the horizontal extent follows the aspect ratio.
    Orthographic { half_height: f32, znear: f32, zfar: f32 },
}

/// Simple right-handed camera description.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub projection: Projection,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Camera {
    pub fn new(eye: Vec3, projection: Projection) -> Self {
        Self {
            eye,
            target: Vec3::new(eye.x, eye.y, 0.0),
            up: Vec3::Y,
            aspect: 1.0,
            projection,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective {
                fovy_radians,
                znear,
                zfar,
            } => Mat4::perspective_rh(fovy_radians, self.aspect, znear, zfar),
            Projection::Orthographic {
                half_height,
                znear,
                zfar,
            } => {
                let half_width = half_height * self.aspect;
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    znear,
                    zfar,
                )
            }
        }
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.aspect = width / height.max(1.0);
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Cast a world-space ray through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let unproject = |z: f32| {
            let p = inv * Vec4::new(ndc.x, ndc.y, z, 1.0);
            p.truncate() / p.w
        };
        match self.projection {
            Projection::Perspective { .. } => {
                let far = unproject(1.0);
                Ray {
                    origin: self.eye,
                    direction: (far - self.eye).normalize_or_zero(),
                }
            }
            Projection::Orthographic { .. } => Ray {
                origin: unproject(0.0),
                direction: self.forward(),
            },
        }
    }
}

/// Map viewport pixel coordinates (origin top-left) to normalized device
/// coordinates in \[-1, 1\] with +y up.
#[inline]
pub fn ndc_from_pixels(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new((x / w) * 2.0 - 1.0, -(y / h) * 2.0 + 1.0)
}
