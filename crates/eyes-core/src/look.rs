//! Smoothed look-at tracking for the eyes model.

use crate::constants::{LOOK_AT_EPSILON, LOOK_AT_PARALLEL_NUDGE};
use crate::state::Transform;
use glam::{Mat3, Quat, Vec3};

/// Rotation that turns an object at `position` so its +Z axis faces `target`.
///
/// Returns `None` when the two points coincide; the caller keeps its current
/// orientation for that tick.
pub fn look_at_rotation(position: Vec3, target: Vec3, up: Vec3) -> Option<Quat> {
    let offset = target - position;
    if offset.length_squared() <= LOOK_AT_EPSILON * LOOK_AT_EPSILON {
        return None;
    }
    let mut z = offset.normalize();
    let mut x = up.cross(z);
    if x.length_squared() <= LOOK_AT_EPSILON * LOOK_AT_EPSILON {
        // forward is parallel to up: nudge off the pole
        if (up.z.abs() - 1.0).abs() <= LOOK_AT_EPSILON {
            z.x += LOOK_AT_PARALLEL_NUDGE;
        } else {
            z.z += LOOK_AT_PARALLEL_NUDGE;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Some(Quat::from_mat3(&Mat3::from_cols(x, y, z)))
}

/// Decompose an orientation into (pitch, yaw) in degrees using XYZ Euler order.
///
/// Pitch is the rotation about X, yaw the rotation about Y.
pub fn pitch_yaw_degrees(rotation: Quat) -> (f32, f32) {
    let m = Mat3::from_quat(rotation);
    let m13 = m.z_axis.x.clamp(-1.0, 1.0);
    let yaw = m13.asin();
    let pitch = if m13.abs() < 0.999_999_9 {
        (-m.z_axis.y).atan2(m.z_axis.z)
    } else {
        m.y_axis.z.atan2(m.y_axis.y)
    };
    (pitch.to_degrees(), yaw.to_degrees())
}

#[derive(Clone, Debug)]
pub struct LookAtController {
    smoothed: Vec3,
    follow: f32,
    turn: f32,
}

impl LookAtController {
    /// `follow` smooths the target point, `turn` the orientation slerp.
    pub fn new(follow: f32, turn: f32) -> Self {
        Self {
            smoothed: Vec3::ZERO,
            follow: follow.clamp(0.0, 1.0),
            turn: turn.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn smoothed(&self) -> Vec3 {
        self.smoothed
    }

    /// Advance one tick: smooth toward `target`, then turn `model` toward the
    /// smoothed point. Returns `false` if the orientation was left unchanged
    /// because the smoothed point sits on the model.
    pub fn update(&mut self, target: Vec3, model: &mut Transform) -> bool {
        self.smoothed = self.smoothed.lerp(target, self.follow);
        match look_at_rotation(model.position, self.smoothed, Vec3::Y) {
            Some(goal) => {
                model.rotation = model.rotation.slerp(goal, self.turn).normalize();
                true
            }
            None => false,
        }
    }
}
