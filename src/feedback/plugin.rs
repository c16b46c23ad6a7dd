//! Feedback plugin - camera shake and rumble sound.

use bevy::prelude::*;

use super::audio::{load_shake_sound, play_shake_sound};
use super::shake::{apply_camera_shake, queue_shakes, ScreenShake};
use crate::core::TowerSet;

/// Feedback plugin - turns `CameraShakeEvent`s into motion and sound.
///
/// Needs `bevy_kira_audio::AudioPlugin` in the app.
pub struct FeedbackPlugin;

impl Plugin for FeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScreenShake>()
            // Config is inserted during Startup
            .add_systems(PostStartup, load_shake_sound)
            .add_systems(
                Update,
                (queue_shakes, apply_camera_shake, play_shake_sound)
                    .chain()
                    .in_set(TowerSet::Feedback),
            );
    }
}
