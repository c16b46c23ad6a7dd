//! Rumble sound played alongside every camera shake.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioSource};

use crate::config::TowerFireConfig;
use crate::core::CameraShakeEvent;

/// Loaded rumble clip and its playback volume.
#[derive(Resource, Debug, Default)]
pub struct ShakeSound {
    pub clip: Option<Handle<AudioSource>>,
    /// Already clamped to 0-1
    pub volume: f32,
}

/// Load the configured rumble clip.
pub fn load_shake_sound(
    mut commands: Commands,
    config: Res<TowerFireConfig>,
    asset_server: Res<AssetServer>,
) {
    let settings = &config.feedback;
    let clip = settings.shake_sound.as_ref().map(|path| {
        info!("Loading shake sound from {}", path);
        asset_server.load::<AudioSource>(path.clone())
    });

    commands.insert_resource(ShakeSound {
        clip,
        volume: settings.shake_volume.clamp(0.0, 1.0),
    });
}

/// One rumble per shake request. Silent when no clip is configured.
pub fn play_shake_sound(
    mut events: EventReader<CameraShakeEvent>,
    sound: Option<Res<ShakeSound>>,
    audio: Res<Audio>,
) {
    let Some(clip) = sound.as_ref().and_then(|s| s.clip.clone()) else {
        events.clear();
        return;
    };
    let volume = sound.map_or(1.0, |s| s.volume);

    for _ in events.read() {
        audio.play(clip.clone()).with_volume(volume as f64);
    }
}
