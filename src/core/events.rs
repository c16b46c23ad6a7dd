//! Global events used for cross-system communication.
//!
//! The fire progress is the hub of the tower cycle: the accumulator sends
//! progress notifications, the collapse sequencer and reward spawner listen.
//! Collaborators never touch the accumulator directly, they send
//! [`ProgressCommand`]s instead.

use bevy::prelude::*;

/// Sent every time the fire progress value changes (add, set or reset).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProgressChanged {
    /// New progress in [0, 1]
    pub progress: f32,
}

/// Sent once per cycle, on the frame progress first reaches 100%.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressComplete;

/// Requests from collaborators to drive the fire progress.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum ProgressCommand {
    /// Jump straight to a value (clamped to [0, 1])
    Set(f32),
    /// Stop accumulating
    Pause,
    /// Resume accumulating, with a fresh interval from now
    Resume,
    /// Back to zero: latches, tower and colliders are restored
    Reset,
}

/// Sent after the accumulator has been reset.
///
/// Every system owning cycle state (latches, tower poses, colliders,
/// effect groups) restores itself when it sees this.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireReset;

/// Sent when the 100% band is crossed and the tower should fall.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapseStarted;

/// Sent whenever something wants the camera to shake.
///
/// The feedback module applies the shake and plays the rumble sound.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CameraShakeEvent {
    /// Maximum offset in world units
    pub intensity: f32,
    /// Seconds until the shake has fully decayed
    pub duration: f32,
}
