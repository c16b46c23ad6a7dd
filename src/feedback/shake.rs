//! Camera shake - a decaying random offset applied to the shake camera.

use bevy::prelude::*;

use crate::core::CameraShakeEvent;

/// Screen shake effect resource.
#[derive(Resource, Debug, Default)]
pub struct ScreenShake {
    pub intensity: f32,
    pub duration: f32,
    pub timer: f32,
}

impl ScreenShake {
    pub fn shake(&mut self, intensity: f32, duration: f32) {
        // Only override if new shake is stronger
        if intensity > self.intensity || self.timer <= 0.0 {
            self.intensity = intensity;
            self.duration = duration;
            self.timer = duration;
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }

    /// Current strength, decaying linearly to zero.
    pub fn current_intensity(&self) -> f32 {
        if self.timer <= 0.0 || self.duration <= 0.0 {
            return 0.0;
        }
        self.intensity * (self.timer / self.duration)
    }

    pub fn update(&mut self, delta: f32) -> Vec3 {
        if self.timer <= 0.0 {
            return Vec3::ZERO;
        }

        self.timer = (self.timer - delta).max(0.0);
        let current_intensity = self.current_intensity();

        // Random offset
        let x = (rand::random::<f32>() - 0.5) * 2.0 * current_intensity;
        let y = (rand::random::<f32>() - 0.5) * 2.0 * current_intensity;

        Vec3::new(x, y, 0.0)
    }
}

/// Camera that receives shake offsets.
///
/// Remembers the offset applied last frame so it can be taken back out
/// before the next one goes in.
#[derive(Component, Debug, Default)]
pub struct ShakeCamera {
    pub applied: Vec3,
}

/// Feed shake requests into the resource.
pub fn queue_shakes(mut events: EventReader<CameraShakeEvent>, mut shake: ResMut<ScreenShake>) {
    for event in events.read() {
        shake.shake(event.intensity, event.duration);
    }
}

/// Apply this frame's offset to every shake camera.
pub fn apply_camera_shake(
    time: Res<Time>,
    mut shake: ResMut<ScreenShake>,
    mut cameras: Query<(&mut Transform, &mut ShakeCamera)>,
) {
    let offset = shake.update(time.delta_secs());

    for (mut transform, mut camera) in cameras.iter_mut() {
        transform.translation += offset - camera.applied;
        camera.applied = offset;
    }
}
