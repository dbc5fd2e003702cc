//! Mutable scene state owned by the [`Driver`](crate::driver::Driver).
//!
//! Everything the per-frame update reads or writes lives here, so several
//! independent scenes can coexist and tests can poke at any part directly.

use crate::autotarget::AutoTargetGenerator;
use crate::camera::{Camera, Ray};
use crate::config::SceneConfig;
use crate::constants::{model_origin, BACKGROUND_Z, PUPIL_Z, SPRITE_SIZE};
use crate::hover::HoverScaler;
use crate::look::LookAtController;
use crate::particles::ParticleSystem;
use crate::picking::{ray_quad, Quad};
use crate::pixel::PixelToggle;
use crate::sprite::SpriteFollower;
use glam::{Mat4, Quat, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Last known pointer position in normalized device coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTracker {
    pub ndc: Vec2,
}

pub struct SceneState {
    pub config: SceneConfig,
    pub camera: Camera,
    pub viewport: Vec2,
    pub origin: Vec2,
    pub pointer: PointerTracker,
    pub hovered: bool,
    pub look: LookAtController,
    /// `None` until the model has loaded.
    pub model: Option<Transform>,
    pub follower: SpriteFollower,
    pub pupil: Vec3,
    pub background_scale: f32,
    pub hover: Option<HoverScaler>,
    pub particles: ParticleSystem,
    pub pixel: PixelToggle,
    pub auto_target: AutoTargetGenerator,
    pub auto_mode: bool,
    pub tick: u64,
}

impl SceneState {
    pub fn new(config: SceneConfig, width: f32, height: f32) -> Self {
        let mut camera = config.camera();
        camera.set_viewport(width, height);
        let origin = config.origin_for_width(width);
        let look = LookAtController::new(config.follow, config.turn);
        let follower = SpriteFollower::new(config.max_shift);
        let hover = config.hover.map(|h| HoverScaler::new(h.base, h.hovered));
        let particles = ParticleSystem::new(config.gravity, config.spawn, config.velocity);
        let pixel = PixelToggle::new(&config.palette);
        let background_scale = config.background_scale();
        Self {
            camera,
            viewport: Vec2::new(width, height),
            origin,
            pointer: PointerTracker::default(),
            hovered: false,
            look,
            model: None,
            follower,
            pupil: Vec3::new(origin.x, origin.y, PUPIL_Z),
            background_scale,
            hover,
            particles,
            pixel,
            auto_target: AutoTargetGenerator::default(),
            auto_mode: false,
            tick: 0,
            config,
        }
    }

    #[inline]
    pub fn model_position(&self) -> Vec3 {
        model_origin() + self.origin.extend(0.0)
    }

    #[inline]
    pub fn background_center(&self) -> Vec3 {
        Vec3::new(self.origin.x, self.origin.y, BACKGROUND_Z)
    }

    /// The clickable background disc as currently scaled.
    pub fn clickable_quad(&self) -> Quad {
        Quad::square(
            self.background_center(),
            SPRITE_SIZE,
            self.background_scale,
        )
    }

    #[inline]
    pub fn pointer_ray(&self) -> Ray {
        self.camera.ray_from_ndc(self.pointer.ndc)
    }

    pub fn hit_clickable(&self, ndc: Vec2) -> Option<Vec3> {
        ray_quad(&self.camera.ray_from_ndc(ndc), &self.clickable_quad())
    }

    /// Point the eyes should face this tick.
    ///
    /// In auto mode only the generator's output counts; the pointer is ignored.
    pub fn look_target(&self) -> Option<Vec3> {
        if self.auto_mode {
            self.auto_target.target()
        } else {
            Some(self.pointer_ray().at(self.config.pointer_distance))
        }
    }

    pub fn model_loaded(&mut self) {
        if self.model.is_none() {
            self.model = Some(Transform::at(self.model_position()));
        }
    }
}
