//! Provides [`Orientation`], the yaw/pitch state of a walking camera.

use std::f32::consts::{FRAC_PI_3, PI, TAU};

use bevy_math::prelude::*;
use bevy_reflect::prelude::*;

/// Largest pitch, up or down, the camera may look.
pub const MAX_PITCH: f32 = FRAC_PI_3;

/// The accumulated look direction of the camera, in radians.
///
/// Yaw is measured about the world Y axis, with a yaw of zero looking down -Z. Pitch is always
/// kept within `[-MAX_PITCH, MAX_PITCH]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct Orientation {
    yaw: f32,
    pitch: f32,
}

impl Orientation {
    /// Create an orientation, clamping the pitch.
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: clamp_pitch(pitch),
        }
    }

    /// An orientation at `from` looking at `target`. Returns the default orientation if the two
    /// points coincide.
    pub fn looking_at(from: Vec3, target: Vec3) -> Self {
        let offset = target - from;
        let Some(yaw) = yaw_towards(from, target) else {
            return Self::default();
        };
        let pitch = offset.y.atan2(Vec2::new(offset.x, offset.z).length());
        Self::new(yaw, pitch)
    }

    /// Current yaw.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch, always within `[-MAX_PITCH, MAX_PITCH]`.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Overwrite the pitch, clamping it to the allowed range.
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = clamp_pitch(pitch);
    }

    /// Rotate by a look delta: `x` is added to the yaw, `y` to the pitch.
    pub fn apply_look(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            return;
        }
        self.yaw += delta.x;
        self.pitch = clamp_pitch(self.pitch + delta.y);
    }

    /// Move the yaw by `amount` radians.
    pub fn turn(&mut self, amount: f32) {
        self.yaw += amount;
    }

    /// The rotation used for rendering.
    pub fn rotation(&self) -> Quat {
        self.rotation_with_offsets(0.0, 0.0)
    }

    /// The rendered rotation with an extra yaw and roll that are not accumulated into the state.
    pub fn rotation_with_offsets(&self, yaw_offset: f32, roll: f32) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw + yaw_offset, self.pitch, roll)
    }

    /// The horizontal forward direction, ignoring pitch.
    pub fn flat_forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// The horizontal right direction, perpendicular to [`Self::flat_forward`].
    pub fn flat_right(&self) -> Vec3 {
        self.flat_forward().cross(Vec3::Y)
    }
}

fn clamp_pitch(pitch: f32) -> f32 {
    if pitch.is_nan() {
        return 0.0;
    }
    pitch.clamp(-MAX_PITCH, MAX_PITCH)
}

/// The yaw that faces from `from` toward `to` in the horizontal plane, or `None` if the points are
/// vertically aligned.
pub fn yaw_towards(from: Vec3, to: Vec3) -> Option<f32> {
    let offset = to - from;
    if offset.x * offset.x + offset.z * offset.z <= f32::EPSILON {
        return None;
    }
    Some((-offset.x).atan2(-offset.z))
}

/// The shortest signed rotation from `current` to `target`, wrapped into `[-PI, PI]`.
pub fn shortest_angle(current: f32, target: f32) -> f32 {
    (target - current + PI).rem_euclid(TAU) - PI
}
