//! Rewards plugin - reward cells that come and go with the tower.

use bevy::prelude::*;

use super::systems;

/// Rewards plugin - spawns cells between fires and clears them on collapse.
pub struct RewardsPlugin;

impl Plugin for RewardsPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_reward_systems(app);
    }
}
