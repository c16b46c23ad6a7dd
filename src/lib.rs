//! Tower Fire - a tower that burns down in bands and collapses.
//!
//! Fire progress grows in random steps until the tower is destroyed. Each
//! progress band lights more fire and shakes the camera; the last one
//! topples the tower, and a timer puts everything back for the next cycle.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, system ordering, tween helpers
//! - **Config**: RON tuning file and its validation
//! - **Fire**: Progress accumulator, threshold bands, fire groups
//! - **Collapse**: Staged fall of the tower, restart timer, reset
//! - **Feedback**: Camera shake and rumble sound
//! - **Rewards**: Reward cells around the tower
//! - **World**: Demo scene and tower zone
//! - **UI**: Fire progress bar, pause menu

pub mod collapse;
pub mod config;
pub mod core;
pub mod feedback;
pub mod fire;
pub mod rewards;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct TowerFirePlugin;

impl Plugin for TowerFirePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Fire progress and thresholds
            .add_plugins(fire::FirePlugin)

            // Tower collapse
            .add_plugins(collapse::CollapsePlugin)

            // Shake and sound
            .add_plugins(feedback::FeedbackPlugin)

            // Reward cells
            .add_plugins(rewards::RewardsPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
