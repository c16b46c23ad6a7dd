//! Pose interpolation helpers with smoothstep easing.

use bevy::prelude::*;

/// Hermite smoothstep on a clamped `t`: slow start, slow end.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let gap = target - current;
    if gap.abs() <= max_delta {
        target
    } else {
        current + gap.signum() * max_delta
    }
}

/// A local position + rotation pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Capture the pose of a transform (scale is left alone).
    pub fn from_transform(transform: &Transform) -> Self {
        Self::new(transform.translation, transform.rotation)
    }

    /// Linear position, spherical rotation. `t` is used as given.
    pub fn interpolate(&self, target: &Pose, t: f32) -> Pose {
        Pose {
            translation: self.translation.lerp(target.translation, t),
            rotation: self.rotation.slerp(target.rotation, t),
        }
    }

    /// Write this pose into a transform, keeping its scale.
    pub fn apply_to(&self, transform: &mut Transform) {
        transform.translation = self.translation;
        transform.rotation = self.rotation;
    }
}

/// Build a rotation from Euler angles in degrees, applied Z, then X, then Y.
pub fn rotation_from_degrees(euler: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        euler.y.to_radians(),
        euler.x.to_radians(),
        euler.z.to_radians(),
    )
}

/// Inverse of [`rotation_from_degrees`].
pub fn rotation_to_degrees(rotation: Quat) -> Vec3 {
    let (y, x, z) = rotation.to_euler(EulerRot::YXZ);
    Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
}
