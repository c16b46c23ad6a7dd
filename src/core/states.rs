//! Game state definitions that control the overall flow of the game.
//!
//! The tower cycle only advances while `InGame`. Pausing freezes the
//! accumulator, running collapse timelines and the restart timer alike.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` while data files are read
/// - `InGame` runs the fire/collapse cycle
/// - `Paused` freezes gameplay but keeps the world visible
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading tuning data
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
}

/// System set ordering for the tower cycle.
///
/// Commands from collaborators are applied first so that a `Set(1.0)` sent
/// this frame is seen by the dispatcher in the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TowerSet {
    Input,
    Progress,
    Thresholds,
    Effects,
    Collapse,
    Feedback,
}
