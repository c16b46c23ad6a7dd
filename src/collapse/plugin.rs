//! Collapse plugin - the tower's fall and the automatic restart.

use bevy::prelude::*;

use super::systems;

/// Collapse plugin - plays the staged fall and restores the tower on reset.
pub struct CollapsePlugin;

impl Plugin for CollapsePlugin {
    fn build(&self, app: &mut App) {
        systems::setup_collapse_systems(app);
    }
}
