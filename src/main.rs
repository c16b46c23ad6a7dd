//! Tower Fire - Entry Point
//!
//! Controls:
//! - Escape: Pause/Unpause
//! - P: Pause/Resume the fire
//! - R: Reset the tower
//! - C: Burn it down now

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins, audio goes through kira instead
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Tower Fire".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Audio
        .add_plugins(AudioPlugin)

        // Our game plugin
        .add_plugins(tower_fire::TowerFirePlugin)

        .run();
}
