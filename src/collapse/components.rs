//! Tower parts and the scene objects the collapse toggles.

use bevy::prelude::*;

use crate::core::Pose;

/// One of the two independently animated halves of the tower.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TowerPart {
    Top,
    Body,
}

/// Local pose a tower part returns to on reset.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RestPose(pub Pose);

/// Floor number markers, hidden while the tower falls.
#[derive(Component)]
pub struct FloorMarkers;

/// Collider around the tower the player may enter. Disabled during the fall.
#[derive(Component)]
pub struct TowerZone;

/// Wall keeping the player out of the debris. Only enabled during the fall.
#[derive(Component)]
pub struct InvisibleWall;

/// Whether the tower is currently falling this cycle.
#[derive(Resource, Debug, Default)]
pub struct CollapseState {
    pub started: bool,
}

/// Countdown from collapse start to the automatic reset.
#[derive(Resource, Debug, Default)]
pub struct RestartTimer(pub Option<Timer>);

impl RestartTimer {
    pub fn start(&mut self, seconds: f32) {
        self.0 = Some(Timer::from_seconds(seconds, TimerMode::Once));
    }

    pub fn cancel(&mut self) {
        self.0 = None;
    }

    pub fn is_running(&self) -> bool {
        self.0.is_some()
    }
}
