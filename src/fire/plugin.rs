//! Fire plugin - progress accumulation and threshold bands.

use bevy::prelude::*;

use super::systems;

/// Fire plugin - drives the tower's burn progress.
pub struct FirePlugin;

impl Plugin for FirePlugin {
    fn build(&self, app: &mut App) {
        systems::setup_fire_systems(app);
    }
}
