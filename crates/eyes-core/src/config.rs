//! Scene presets.
//!
//! The three variants share one update model and differ only in the numbers
//! below. Front-ends pick one by name and may tweak fields before building
//! the scene.

use crate::camera::{Camera, Projection};
use crate::constants::{NARROW_BREAKPOINT_PX, PIXEL_PALETTE};
use crate::particles::{SpawnPattern, VelocityRanges};
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Perspective,
    Orthographic,
    Responsive,
}

impl Variant {
    pub const ALL: [Variant; 3] = [
        Variant::Perspective,
        Variant::Orthographic,
        Variant::Responsive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Perspective => "perspective",
            Variant::Orthographic => "orthographic",
            Variant::Responsive => "responsive",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "perspective" | "1" => Some(Variant::Perspective),
            "orthographic" | "ortho" | "2" => Some(Variant::Orthographic),
            "responsive" | "mobile" | "3" => Some(Variant::Responsive),
            _ => None,
        }
    }

    /// Resolve an optional user-supplied name, falling back to `Responsive`.
    pub fn from_name_or_default(name: Option<&str>) -> Self {
        match name {
            Some(n) => Self::from_name(n).unwrap_or_else(|| {
                log::warn!("[config] unknown variant {:?}; using responsive", n);
                Variant::Responsive
            }),
            None => Variant::Responsive,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverLevels {
    pub base: f32,
    pub hovered: f32,
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub variant: Variant,
    pub camera_eye: Vec3,
    pub projection: Projection,
    /// Target smoothing factor (higher is snappier).
    pub follow: f32,
    /// Orientation slerp factor.
    pub turn: f32,
    /// Distance along the pointer ray at which the look target sits.
    pub pointer_distance: f32,
    pub max_shift: f32,
    /// Composition origin used on wide viewports.
    pub layout_origin: Vec2,
    pub gravity: f32,
    pub spawn: SpawnPattern,
    pub velocity: VelocityRanges,
    pub hover: Option<HoverLevels>,
    pub auto_target: bool,
    pub narrow_breakpoint: f32,
    pub palette: Vec<f32>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::for_variant(Variant::Responsive)
    }
}

impl SceneConfig {
    pub fn for_variant(variant: Variant) -> Self {
        let eye = Vec3::new(0.0, 0.0, 25.0);
        let ortho = Projection::Orthographic {
            half_height: 15.0,
            znear: 0.1,
            zfar: 1000.0,
        };
        match variant {
            Variant::Perspective => Self {
                variant,
                camera_eye: eye,
                projection: Projection::Perspective {
                    fovy_radians: 75.0_f32.to_radians(),
                    znear: 0.1,
                    zfar: 1000.0,
                },
                follow: 0.1,
                turn: 0.1,
                pointer_distance: 17.0,
                max_shift: 11.0,
                layout_origin: Vec2::ZERO,
                gravity: 0.01,
                spawn: SpawnPattern::AtHit { count: 100 },
                velocity: VelocityRanges::BIASED,
                hover: None,
                auto_target: false,
                narrow_breakpoint: NARROW_BREAKPOINT_PX,
                palette: PIXEL_PALETTE.to_vec(),
            },
            Variant::Orthographic => Self {
                variant,
                camera_eye: eye,
                projection: ortho,
                follow: 0.3,
                turn: 0.1,
                pointer_distance: 17.0,
                max_shift: 6.0,
                layout_origin: Vec2::ZERO,
                gravity: 0.01,
                spawn: SpawnPattern::AtHit { count: 100 },
                velocity: VelocityRanges::BIASED,
                hover: None,
                auto_target: false,
                narrow_breakpoint: NARROW_BREAKPOINT_PX,
                palette: PIXEL_PALETTE.to_vec(),
            },
            Variant::Responsive => Self {
                variant,
                camera_eye: eye,
                projection: ortho,
                follow: 0.07,
                turn: 0.1,
                pointer_distance: 17.0,
                max_shift: 8.0,
                layout_origin: Vec2::new(6.0, 0.0),
                gravity: 0.03,
                spawn: SpawnPattern::Ring {
                    count: 75,
                    radius: 4.0,
                },
                velocity: VelocityRanges::SYMMETRIC,
                hover: Some(HoverLevels {
                    base: 0.7,
                    hovered: 0.8,
                }),
                auto_target: true,
                narrow_breakpoint: NARROW_BREAKPOINT_PX,
                palette: PIXEL_PALETTE.to_vec(),
            },
        }
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.camera_eye, self.projection)
    }

    /// Idle scale of the clickable background sprite.
    pub fn background_scale(&self) -> f32 {
        self.hover.map(|h| h.base).unwrap_or(1.0)
    }

    pub fn is_narrow(&self, viewport_width: f32) -> bool {
        viewport_width < self.narrow_breakpoint
    }

    /// Composition origin for a viewport width; narrow layouts are centred.
    pub fn origin_for_width(&self, viewport_width: f32) -> Vec2 {
        if self.is_narrow(viewport_width) {
            Vec2::ZERO
        } else {
            self.layout_origin
        }
    }
}
