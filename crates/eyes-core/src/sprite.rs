use crate::constants::{SPRITE_LERP, SPRITE_MAX_ANGLE_DEG};
use crate::look::pitch_yaw_degrees;
use glam::{Quat, Vec2, Vec3};

/// Drives the pupil sprite from the model's pitch and yaw.
#[derive(Clone, Debug)]
pub struct SpriteFollower {
    pub max_angle_deg: f32,
    pub max_shift: f32,
    pub lerp: f32,
}

impl SpriteFollower {
    pub fn new(max_shift: f32) -> Self {
        Self {
            max_angle_deg: SPRITE_MAX_ANGLE_DEG,
            max_shift: max_shift.abs(),
            lerp: SPRITE_LERP,
        }
    }

    /// Offset for the given angles, before any layout origin is added.
    ///
    /// Yaw moves the sprite against its sign, pitch with it; the result never
    /// exceeds `max_shift` in length.
    pub fn offset_for(&self, pitch_deg: f32, yaw_deg: f32) -> Vec2 {
        let raw = Vec2::new(
            -(yaw_deg / self.max_angle_deg) * self.max_shift,
            (pitch_deg / self.max_angle_deg) * self.max_shift,
        );
        raw.clamp_length_max(self.max_shift)
    }

    /// Target sprite position for a model orientation.
    pub fn target_for(&self, rotation: Quat, origin: Vec2) -> Vec2 {
        let (pitch, yaw) = pitch_yaw_degrees(rotation);
        origin + self.offset_for(pitch, yaw)
    }

    /// Ease the sprite one tick toward its target; depth is left untouched.
    pub fn update(&self, rotation: Quat, origin: Vec2, sprite_position: &mut Vec3) {
        let target = self.target_for(rotation, origin);
        sprite_position.x += (target.x - sprite_position.x) * self.lerp;
        sprite_position.y += (target.y - sprite_position.y) * self.lerp;
    }
}
